use super::CalculationError;
use crate::domain::Decimal;
use rust_decimal::Decimal as RustDecimal;

/// Percent of the network reward routed to the staker pool.
pub const STAKER_POOL_NETWORK_PERCENT: i64 = 30;
/// Percent of the network reward routed to the work-point pool.
pub const WORKPOINT_POOL_NETWORK_PERCENT: i64 = 70;

/// One account's cut of a distribution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountAllocation {
    pub staker_pool: Decimal,
    pub workpoint_pool: Decimal,
    pub staker_share_portion: Decimal,
    pub work_share_portion: Decimal,
    pub account_reward: Decimal,
}

fn percent(value: i64) -> Decimal {
    Decimal::new(RustDecimal::new(value, 2))
}

/// `account / total`, or zero when nobody earned any points.
fn share(
    account: Decimal,
    total: Decimal,
    what: &'static str,
) -> Result<Decimal, CalculationError> {
    if total.is_zero() {
        return Ok(Decimal::zero());
    }
    account.checked_div(total).ok_or(CalculationError::Overflow(what))
}

/// Split minted VTX into the staker and work-point pools, then take the
/// account's proportional share of each.
///
/// The bootstrap reward goes entirely to the staker pool; the network reward is
/// split 30/70 between the staker and work-point pools.
pub fn allocate(
    network_reward: Decimal,
    bootstrap_reward: Decimal,
    account_staker_points: Decimal,
    total_staker_points: Decimal,
    account_work_points: Decimal,
    total_work_points: Decimal,
) -> Result<AccountAllocation, CalculationError> {
    let staker_pool = network_reward
        .checked_mul(percent(STAKER_POOL_NETWORK_PERCENT))
        .and_then(|v| bootstrap_reward.checked_add(v))
        .ok_or(CalculationError::Overflow("staker pool"))?;
    let workpoint_pool = network_reward
        .checked_mul(percent(WORKPOINT_POOL_NETWORK_PERCENT))
        .ok_or(CalculationError::Overflow("workpoint pool"))?;

    let staker_share_portion = share(account_staker_points, total_staker_points, "staker share")?;
    let work_share_portion = share(account_work_points, total_work_points, "work share")?;

    let account_reward = staker_share_portion
        .checked_mul(staker_pool)
        .zip(work_share_portion.checked_mul(workpoint_pool))
        .and_then(|(staker, work)| staker.checked_add(work))
        .ok_or(CalculationError::Overflow("account reward"))?;

    Ok(AccountAllocation {
        staker_pool,
        workpoint_pool,
        staker_share_portion,
        work_share_portion,
        account_reward,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_pool_split_is_30_70() {
        assert_eq!(STAKER_POOL_NETWORK_PERCENT + WORKPOINT_POOL_NETWORK_PERCENT, 100);
        let a = allocate(d("1000"), Decimal::zero(), d("1"), d("1"), d("1"), d("1")).unwrap();
        assert_eq!(a.staker_pool, d("300"));
        assert_eq!(a.workpoint_pool, d("700"));
    }

    #[test]
    fn test_allocate_proportional_shares() {
        let a = allocate(d("1000"), d("100"), d("50"), d("200"), d("30"), d("300")).unwrap();
        assert_eq!(a.staker_pool, d("400"));
        assert_eq!(a.workpoint_pool, d("700"));
        assert_eq!(a.staker_share_portion, d("0.25"));
        assert_eq!(a.work_share_portion, d("0.1"));
        assert_eq!(a.account_reward, d("170"));
    }

    #[test]
    fn test_zero_totals_give_zero_share() {
        let zero = Decimal::zero();
        let a = allocate(d("1000"), d("100"), d("50"), zero, d("30"), zero).unwrap();
        assert_eq!(a.staker_share_portion, Decimal::zero());
        assert_eq!(a.work_share_portion, Decimal::zero());
        assert_eq!(a.account_reward, Decimal::zero());
    }

    #[test]
    fn test_bootstrap_goes_to_staker_pool_only() {
        let a = allocate(Decimal::zero(), d("250"), d("1"), d("2"), d("1"), d("2")).unwrap();
        assert_eq!(a.staker_pool, d("250"));
        assert_eq!(a.workpoint_pool, Decimal::zero());
        assert_eq!(a.account_reward, d("125"));
    }
}
