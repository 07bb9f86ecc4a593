use crate::error::ApiError;
use crate::images::{ImageUpload, UploadError};
use crate::recipes::{IngredientsInput, RecipeInput};
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use utoipa::ToSchema;

/// Multipart body accepted by create and update. On update every field is optional.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct RecipeFormRequest {
    pub title: Option<String>,
    /// Comma separated, or one part per ingredient (`ingredients[]`)
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    #[schema(rename = "coverImage", value_type = Option<String>, format = Binary)]
    pub cover_image: Option<Vec<u8>>,
}

/// A decoded recipe form: text fields plus an already validated image.
#[derive(Debug, Default)]
pub struct RecipeForm {
    pub input: RecipeInput,
    pub image: Option<ImageUpload>,
}

impl RecipeForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = RecipeForm::default();
        let mut ingredients: Vec<String> = Vec::new();
        let mut listed = false;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.input.title = Some(field.text().await.map_err(multipart_error)?),
                "instructions" => {
                    form.input.instructions = Some(field.text().await.map_err(multipart_error)?)
                }
                "ingredients" | "ingredients[]" => {
                    listed |= name.ends_with("[]");
                    ingredients.push(field.text().await.map_err(multipart_error)?);
                }
                "coverImage" => {
                    let content_type = field.content_type().map(str::to_owned);
                    let data = field.bytes().await.map_err(multipart_error)?;
                    // Browsers send an empty file part when nothing was picked.
                    if !data.is_empty() {
                        form.image = Some(ImageUpload::new(content_type.as_deref(), data.to_vec())?);
                    }
                }
                _ => tracing::debug!(field = %name, "ignoring unknown form field"),
            }
        }

        form.input.ingredients = match ingredients.len() {
            0 => None,
            1 if !listed => ingredients.pop().map(IngredientsInput::Delimited),
            _ => Some(IngredientsInput::List(ingredients)),
        };

        Ok(form)
    }
}

fn multipart_error(e: MultipartError) -> ApiError {
    tracing::warn!("Multipart read error: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge.into()
    } else {
        ApiError::Validation(format!("Failed to read multipart data: {}", e.body_text()))
    }
}
