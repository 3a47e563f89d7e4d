//! Site crawlers producing normalized [`Article`](crate::models::Article)
//! records.
//!
//! Each crawler follows the same two-phase pattern:
//!
//! 1. **Listing**: fetch the category's feed or listing page(s) and collect
//!    entries, applying the per-call link dedup and the item limit
//! 2. **Detail**: fetch each entry's own page to extract the full body text
//!    and a representative image
//!
//! # Supported sources
//!
//! | Source | Module | Listing | Detail |
//! |--------|--------|---------|--------|
//! | VnExpress | [`vnexpress`] | RSS feed per category | `fck_detail` container, `p.Normal` paragraphs |
//! | Otofun | [`otofun`] | Paginated forum listing | First post's `bbWrapper` body |
//!
//! # Failure policy
//!
//! Detail-page failures are never fatal: the item is still emitted with an
//! empty or placeholder body. Only a failed listing fetch fails the category,
//! and the orchestrator degrades that to zero items for the category.

pub mod otofun;
pub mod vnexpress;
