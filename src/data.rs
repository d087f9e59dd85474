//! Per-locale site data tables.

mod loader;
mod types;

pub use loader::{
    DATA_TABLES,
    DataError,
    DataTranslations,
    LocaleData,
};
pub use types::{
    Author,
    DefaultImage,
    FaqItem,
    NavDropdown,
    NavItem,
    NavLink,
    SiteData,
    SiteSettingsProps,
    TestimonialItem,
};
