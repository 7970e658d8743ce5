/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The fetched camera catalog (catalog.rs)
/// - Filtering and sorting into the visible list (filter.rs)
/// - Per-card snapshot load state (cards.rs)
/// - Full-screen viewer navigation (viewer.rs)
/// - Staggered card entrance (reveal.rs)
/// - The session controller tying it together (session.rs)

pub mod data;
pub mod catalog;
pub mod filter;
pub mod cards;
pub mod viewer;
pub mod reveal;
pub mod session;
