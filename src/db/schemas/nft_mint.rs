//! Minted-NFT ledger document schema
//!
//! Side table written by the mint-claim handler: one document per minted
//! badge, keyed by user address.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Collection name for the minted-NFT ledger
pub const NFT_MINT_COLLECTION: &str = "nft_mints";

/// One minted badge
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NftMintDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Wallet address the badge was minted to (raw casing as stored)
    #[serde(default)]
    pub user_address: Option<String>,

    /// Badge level
    #[serde(default)]
    pub level: Option<i64>,

    /// Badge level display name
    #[serde(default)]
    pub level_name: Option<String>,

    /// On-chain transaction hash of the mint
    #[serde(default)]
    pub transaction_hash: Option<String>,

    /// Mint timestamp
    #[serde(default)]
    pub minted_at: Option<bson::DateTime>,

    /// Module the badge was minted for, when recorded
    #[serde(default)]
    pub module_id: Option<String>,
}
