//! Product management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect},
};
use infinity_vibe_core::{Product, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Product list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<Product>,
    pub admin_email: String,
}

/// New product form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct ProductNewTemplate {
    pub error: Option<String>,
    pub admin_email: String,
}

/// Collected multipart form fields for product creation.
#[derive(Default)]
struct ProductForm {
    name: String,
    price: String,
    badge: String,
    category: String,
    image_name: String,
    image_type: String,
    image_bytes: Vec<u8>,
}

/// List all products.
///
/// GET /
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Result<impl IntoResponse> {
    let products = state.catalog().list_products().await?;

    Ok(ProductsIndexTemplate {
        products,
        admin_email: admin.email,
    })
}

/// Render the new product form.
///
/// GET /products/new
#[instrument(skip(admin))]
pub async fn new_form(RequireAdminAuth(admin): RequireAdminAuth) -> impl IntoResponse {
    ProductNewTemplate {
        error: None,
        admin_email: admin.email,
    }
}

/// Create a product: upload the image, then create the document.
///
/// POST /products (multipart)
#[instrument(skip(state, admin, multipart))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    multipart: Multipart,
) -> Result<axum::response::Response> {
    let form = read_product_form(multipart).await?;

    if let Err(message) = validate(&form) {
        return Ok(ProductNewTemplate {
            error: Some(message),
            admin_email: admin.email,
        }
        .into_response());
    }

    let image_url = state
        .storage()
        .upload_image(&form.image_name, &form.image_type, form.image_bytes)
        .await?;

    let price = normalize_price(&form.price);
    let badge = form.badge.trim();
    let badge = (!badge.is_empty()).then_some(badge);

    state
        .catalog()
        .create_product(
            form.name.trim(),
            &price,
            &image_url,
            badge,
            form.category.trim(),
        )
        .await?;

    Ok(Redirect::to("/").into_response())
}

/// Delete a product.
///
/// POST /products/{id}/delete
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.catalog().delete_product(&ProductId::from(id)).await?;
    Ok(Redirect::to("/"))
}

/// Drain the multipart stream into a `ProductForm`.
async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                form.image_name = field.file_name().unwrap_or("upload").to_string();
                form.image_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                form.image_bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
            }
            "name" | "price" | "badge" | "category" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                match name.as_str() {
                    "name" => form.name = value,
                    "price" => form.price = value,
                    "badge" => form.badge = value,
                    _ => form.category = value,
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Check required fields, returning a user-facing message on failure.
fn validate(form: &ProductForm) -> std::result::Result<(), String> {
    if form.name.trim().is_empty() {
        return Err("Product name is required.".to_string());
    }
    if form.price.trim().is_empty() {
        return Err("Price is required.".to_string());
    }
    if form.category.trim().is_empty() {
        return Err("Category is required.".to_string());
    }
    if form.image_bytes.is_empty() {
        return Err("Product image is required.".to_string());
    }
    Ok(())
}

/// Normalize a price input to the display form the storefront renders:
/// a `₹`-prefixed string with no surrounding whitespace.
fn normalize_price(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with('₹') {
        trimmed.to_string()
    } else {
        format!("₹{trimmed}")
    }
}
