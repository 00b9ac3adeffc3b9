//! Substrate storage keys and SCALE value decoding for the Root chain.
//!
//! Keys follow FRAME's layout: `twox128(pallet) ++ twox128(item) ++ hashed keys`.

use super::DataSourceError;
use crate::domain::{Address, AssetBalance, AssetId, Decimal, VtxDistributionId};
use codec::{Decode, Encode};
use sp_core_hashing::{blake2_128, twox_128, twox_64};

pub const VORTEX_PALLET: &str = "VortexDistribution";
pub const ASSETS_PALLET: &str = "Assets";

pub const FEE_POT_ASSETS_LIST: &str = "FeePotAssetsList";
pub const VTX_VAULT_ASSETS_LIST: &str = "VtxVaultAssetsList";
pub const TOTAL_WORK_POINTS: &str = "TotalWorkPoints";
pub const TOTAL_REWARD_POINTS: &str = "TotalRewardPoints";
pub const WORK_POINTS: &str = "WorkPoints";
pub const REWARD_POINTS: &str = "RewardPoints";
pub const ASSET: &str = "Asset";

/// Root chain account id.
type AccountId20 = [u8; 20];

pub fn storage_prefix(pallet: &str, item: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(&twox_128(pallet.as_bytes()));
    key.extend_from_slice(&twox_128(item.as_bytes()));
    key
}

fn twox_64_concat(encoded: &[u8]) -> Vec<u8> {
    let mut out = twox_64(encoded).to_vec();
    out.extend_from_slice(encoded);
    out
}

fn blake2_128_concat(encoded: &[u8]) -> Vec<u8> {
    let mut out = blake2_128(encoded).to_vec();
    out.extend_from_slice(encoded);
    out
}

/// Key of a `VortexDistribution` map keyed `Twox64Concat` by distribution id.
pub fn vortex_map_key(item: &str, vtx_distribution_id: VtxDistributionId) -> Vec<u8> {
    let mut key = storage_prefix(VORTEX_PALLET, item);
    key.extend(twox_64_concat(&vtx_distribution_id.encode()));
    key
}

/// Key of a `VortexDistribution` double map keyed `Blake2_128Concat` by
/// distribution id then account.
pub fn vortex_account_key(
    item: &str,
    vtx_distribution_id: VtxDistributionId,
    account: &Address,
) -> Vec<u8> {
    let mut key = storage_prefix(VORTEX_PALLET, item);
    key.extend(blake2_128_concat(&vtx_distribution_id.encode()));
    key.extend(blake2_128_concat(account.as_bytes()));
    key
}

/// Key of `Assets::Asset(asset_id)`.
pub fn asset_details_key(asset_id: AssetId) -> Vec<u8> {
    let mut key = storage_prefix(ASSETS_PALLET, ASSET);
    key.extend(blake2_128_concat(&asset_id.encode()));
    key
}

fn decode_err(what: &str, err: codec::Error) -> DataSourceError {
    DataSourceError::ParseError(format!("{}: {}", what, err))
}

fn to_decimal(value: u128, what: &str) -> Result<Decimal, DataSourceError> {
    Decimal::from_u128(value)
        .map_err(|e| DataSourceError::ParseError(format!("{} out of range: {}", what, e)))
}

/// Decode a `Vec<(AssetId, Balance)>` value; absent storage is an empty list.
pub fn decode_asset_balances(
    raw: Option<&[u8]>,
    what: &str,
) -> Result<Vec<AssetBalance>, DataSourceError> {
    let Some(mut bytes) = raw else {
        return Ok(Vec::new());
    };
    let pairs = Vec::<(AssetId, u128)>::decode(&mut bytes).map_err(|e| decode_err(what, e))?;
    pairs
        .into_iter()
        .map(|(asset_id, balance)| Ok(AssetBalance::new(asset_id, to_decimal(balance, what)?)))
        .collect()
}

/// Decode a `u128` value-query item; absent storage is zero.
pub fn decode_u128(raw: Option<&[u8]>, what: &str) -> Result<Decimal, DataSourceError> {
    let Some(mut bytes) = raw else {
        return Ok(Decimal::zero());
    };
    let value = u128::decode(&mut bytes).map_err(|e| decode_err(what, e))?;
    to_decimal(value, what)
}

/// Decode the `supply` field of `pallet_assets::AssetDetails`.
///
/// Only the leading owner/issuer/admin/freezer accounts and the supply are read.
pub fn decode_asset_supply(
    raw: Option<&[u8]>,
    asset_id: AssetId,
) -> Result<Decimal, DataSourceError> {
    let mut bytes = raw.ok_or_else(|| DataSourceError::NotFound(format!("asset {}", asset_id)))?;
    let (_owner, _issuer, _admin, _freezer, supply) =
        <(AccountId20, AccountId20, AccountId20, AccountId20, u128)>::decode(&mut bytes)
            .map_err(|e| decode_err("asset details", e))?;
    to_decimal(supply, "asset supply")
}
