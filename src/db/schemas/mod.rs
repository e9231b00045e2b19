//! Document schemas for the portal's MongoDB collections
//!
//! These mirror documents owned and written elsewhere in the portal; field
//! names are the stored camelCase keys. Certification fields are kept as raw
//! BSON (array-or-object, see `submissions::certification`).

mod advocate;
mod foundation;
mod nft_mint;
mod progress;

pub use advocate::{AdvocateDoc, ADVOCATE_COLLECTION};
pub use foundation::{FoundationDoc, FOUNDATION_COLLECTION};
pub use nft_mint::{NftMintDoc, NFT_MINT_COLLECTION};
pub use progress::{ModuleProgress, UserProgressDoc, PROGRESS_COLLECTION};
