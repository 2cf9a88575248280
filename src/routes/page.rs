//! # routes::page
//!
//! HTML endpoints: the full deck page and the `#deck` fragment the page
//! script swaps in after every commit.

use axum::{extract::State, response::Html};
use chrono::Utc;

use crate::state::SharedState;
use crate::view::{page, CatalogView, DeckView};

/// GET /
pub async fn index(State(state): State<SharedState>) -> Html<String> {
    let now = Utc::now();
    let deck = DeckView::build(&state.store.snapshot(), now);
    let catalog = CatalogView::build(&state.catalog, now);
    Html(page::render_page(&deck, &catalog))
}

/// GET /fragments/deck
pub async fn deck_fragment(State(state): State<SharedState>) -> Html<String> {
    let deck = DeckView::build(&state.store.snapshot(), Utc::now());
    Html(page::render_deck(&deck))
}
