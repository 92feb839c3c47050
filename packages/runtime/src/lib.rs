pub mod constants;
pub mod css_text;
pub mod error;
pub mod inject;
pub mod ordered_sheet;
pub mod roots;
pub mod sheet;

pub use constants::ConstantRegistry;
pub use error::{SheetError, SheetResult};
pub use inject::{escalate, specificity_level, StyleInjector};
pub use ordered_sheet::{GroupKey, OrderedStyleSheet};
pub use roots::{RootId, StyleSheetRoots};
pub use sheet::{LiveStyleSheet, MemoryStyleSheet};
pub use stylekit_common::InjectableStyle;
