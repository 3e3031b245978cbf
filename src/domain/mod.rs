//! Typed request and response objects ("beans") of the Confluence REST API.
//!
//! Wire names follow the API's camelCase; fields the server may omit are
//! optional and unknown fields are ignored.

pub mod attachment;
pub mod content;
pub mod label;
pub mod links;
pub mod search;
pub mod space;
pub mod user;

pub use attachment::{AttachmentBean, AttachmentExtensions, AttachmentMetadata, AttachmentResultsBean, AttachmentUpload};
pub use content::{
  BodyBean, ContentBean, ContentQuery, ContentResultsBean, ContentStatus, ContentType, HistoryBean, StorageBean,
  VersionBean,
};
pub use label::{LabelBean, LabelsBean};
pub use links::LinksBean;
pub use search::{CqlSearchBean, CqlSearchResult, DecodeError, SearchResultBean, SearchResultEntry};
pub use space::{IconBean, SpaceBean, SpaceQuery, SpaceResultsBean, SpaceStatus, SpaceType};
pub use user::{ProfilePictureBean, UserBean};
