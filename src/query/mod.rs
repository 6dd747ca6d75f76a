//! Query state and its URL representation
//!
//! - `types`: `QueryState`, filter dimensions, sort field and order
//! - `codec`: canonical query-string encoding and lenient decoding

pub mod codec;
pub mod types;

pub use codec::{DecodeOptions, decode, decode_with, encode, encode_filters};
pub use types::{
    DEFAULT_PAGE_SIZE, FilterDimension, FilterMap, PAGE_SIZE_CHOICES, PAGE_SIZE_MAX,
    PAGE_SIZE_MIN, QueryState, SortField, SortOrder, clamp_page_size, split_tokens,
};
