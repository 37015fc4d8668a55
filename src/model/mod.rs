pub mod branding;
pub mod games;
pub mod theme;
