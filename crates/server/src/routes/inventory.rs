//! Inventory route handlers.
//!
//! The dashboard page, the stats+table fragment it refreshes, the modal
//! Create/Edit form, the product mutations, and the SSE change feed.
//!
//! Mutations never touch the rendered list directly: they go through the
//! product store, whose push makes every connected client (including the
//! one that mutated) refetch the canonical list.

use std::convert::Infallible;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::Stream;
use serde::Deserialize;

use inventory_hub_core::{Category, ProductId};

use crate::error::AppError;
use crate::filters;
use crate::forms::{FieldErrors, ProductForm};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Product};
use crate::state::AppState;
use crate::views::{InventoryStats, filter_products};

/// Search query parameter.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    fn term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

// =============================================================================
// Templates
// =============================================================================

/// The inventory dashboard page.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/dashboard.html")]
pub struct DashboardTemplate {
    pub user: CurrentUser,
    pub search: String,
    pub products: Vec<Product>,
    pub stats: InventoryStats,
}

/// Stats cards + product table fragment (HTMX refresh target).
#[derive(Template, WebTemplate)]
#[template(path = "inventory/_panel.html")]
pub struct PanelTemplate {
    pub products: Vec<Product>,
    pub stats: InventoryStats,
}

/// Modal Create/Edit form fragment.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/_form.html")]
pub struct FormTemplate {
    pub form: ProductForm,
    pub name_error: Option<&'static str>,
    pub price_error: Option<&'static str>,
    pub quantity_error: Option<&'static str>,
    /// Product id when editing; `None` for create.
    pub editing: Option<String>,
    pub categories: [Category; 4],
}

impl FormTemplate {
    fn new(form: ProductForm, errors: &FieldErrors, editing: Option<String>) -> Self {
        Self {
            form,
            name_error: errors.name_message(),
            price_error: errors.price_message(),
            quantity_error: errors.quantity_message(),
            editing,
            categories: Category::ALL,
        }
    }
}

// =============================================================================
// Pages & Fragments
// =============================================================================

/// Display the inventory dashboard.
pub async fn dashboard(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let canonical = state.products().current();
    let stats = InventoryStats::compute(&canonical);
    let products = filter_products(&canonical, query.term());

    DashboardTemplate {
        user,
        search: query.term().to_owned(),
        products,
        stats,
    }
}

/// Stats + table fragment, refetched on load, search input, and feed pushes.
pub async fn panel(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let canonical = state.products().current();
    let stats = InventoryStats::compute(&canonical);
    let products = filter_products(&canonical, query.term());

    PanelTemplate { products, stats }
}

/// SSE change feed.
///
/// Emits an event per canonical-list push; clients respond by refetching the
/// panel fragment. The stream ends if the feed closes — reconnecting is the
/// browser `EventSource`'s job, not ours.
pub async fn live(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut subscription = state.products().subscribe();

    let stream = async_stream::stream! {
        while subscription.changed().await.is_ok() {
            yield Ok::<_, Infallible>(Event::default().event("products").data("changed"));
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// =============================================================================
// Modal Form
// =============================================================================

/// Open the modal for a new product (blank defaults).
pub async fn new_form(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    FormTemplate::new(ProductForm::blank(), &FieldErrors::default(), None)
}

/// Open the modal pre-filled from an existing product.
pub async fn edit_form(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;

    let product = state
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(FormTemplate::new(
        ProductForm::from_product(&product),
        &FieldErrors::default(),
        Some(product.id.to_string()),
    )
    .into_response())
}

// =============================================================================
// Mutations
// =============================================================================

/// Create a product from a submitted draft.
///
/// Validation failures re-render the modal with per-field errors and make no
/// repository call; success clears the modal (the new row arrives over SSE).
pub async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return Ok(FormTemplate::new(form, &errors, None).into_response());
        }
    };

    state
        .products()
        .create(&input)
        .await
        .map_err(|e| AppError::persistence("add", e))?;

    Ok(close_modal())
}

/// Update a product from a submitted draft (full replacement field set).
pub async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let product_id = parse_id(&id)?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return Ok(FormTemplate::new(form, &errors, Some(id)).into_response());
        }
    };

    state
        .products()
        .update_by_id(product_id, &input)
        .await
        .map_err(|e| AppError::persistence("update", e))?;

    Ok(close_modal())
}

/// Delete a product. The confirmation step already happened client-side.
///
/// Deleting an id that is already gone fails like any other persistence
/// failure; there is no special idempotency handling.
pub async fn delete(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;

    state
        .products()
        .delete_by_id(id)
        .await
        .map_err(|e| AppError::persistence("delete", e))?;

    Ok(Html(String::new()).into_response())
}

fn parse_id(raw: &str) -> Result<ProductId, AppError> {
    ProductId::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// An empty swap target: closes the modal.
fn close_modal() -> Response {
    Html(String::new()).into_response()
}
