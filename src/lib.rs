//! Funnel builder: a Leptos client-side app around a canvas editor where
//! funnel steps are dropped, dragged and wired into a directed graph.
//!
//! [`FunnelEditor`] is the canvas component and [`NodePalette`] its drag
//! source. [`GraphModel`] holds the graph itself and has no DOM dependency,
//! so starter content can be built with it and handed over as a
//! [`GraphSnapshot`].

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
mod pages;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

pub use crate::components::funnel_editor::{
	Edge, EdgeId, FunnelEditor, GraphModel, GraphSnapshot, MetricData, Node, NodeId, NodePalette,
	NodeType, Point,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the funnel builder and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		<Title text="Funnel Builder" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
