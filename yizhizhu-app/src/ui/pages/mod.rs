//! Wizard Pages - One widget per registration step
//!
//! Pages write straight into the shared form; navigation lives in the
//! wizard view.

mod app_info;
mod choice;
mod complete;
mod confirm;
mod dev_info;
mod features;
mod identity;

pub use app_info::AppInfoPage;
pub use complete::CompletePage;
pub use confirm::ConfirmPage;
pub use dev_info::DevInfoPage;
pub use features::FeaturesPage;
pub use identity::{identity_from_name, identity_name, IdentityPage};
