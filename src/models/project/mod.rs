//! Project request and response objects

pub mod create;
pub mod update;
pub mod view;

pub use create::{
    PostCoordinatorData, PostFundingSource, PostIucnClassification, PostLocationData,
    PostObjectivesData, PostPermit, PostProjectData, PostProjectObject,
};
pub use update::{
    PutCoordinatorData, PutLocationData, PutObjectivesData, PutPermitData, PutProjectData,
    PutProjectObject,
};
pub use view::{ProjectListItem, ProjectViewObject};
