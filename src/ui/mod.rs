/// UI widgets for the dashboard
///
/// Every function here is a pure view of the session state; all changes go
/// back through `Message`.

pub mod style;
pub mod header;
pub mod controls;
pub mod card;
pub mod grid;
pub mod viewer;
