//! Kids gaming site content sync: loads the branding, theme and games
//! documents and writes them into a page surface, including the release
//! countdown.

pub mod brand;
pub mod catalog;
pub mod countdown;
pub mod error;
pub mod html;
pub mod loader;
pub mod model;
pub mod page;
pub mod render;
pub mod site;
pub mod theme;
