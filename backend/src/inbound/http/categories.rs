//! Category registry API handlers.
//!
//! ```text
//! GET    /categories
//! GET    /categories/{id}
//! POST   /categories       {"name":"Tools","item_range":5}
//! PUT    /categories/{id}  {"name":"Garden"}   (PATCH is an alias)
//! DELETE /categories/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Category, CategoryDraft, CategoryId, CategoryName, CategoryPatch, Error, ItemRange,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, category_validation_error, parse_identifier, require,
};

const ID: FieldName = FieldName::new("id");
const NAME: FieldName = FieldName::new("name");
const ITEM_RANGE: FieldName = FieldName::new("item_range");

/// Category as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CategoryDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Shop")]
    pub name: String,
    #[schema(example = 24)]
    pub item_range: i32,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id().get(),
            name: value.name().as_ref().to_owned(),
            item_range: value.item_range().get(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub category: CategoryDto,
}

/// Body for `POST /categories`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Tools")]
    pub name: Option<String>,
    #[schema(example = 5)]
    pub item_range: Option<i32>,
}

impl TryFrom<CreateCategoryRequest> for CategoryDraft {
    type Error = Error;

    fn try_from(value: CreateCategoryRequest) -> Result<Self, Self::Error> {
        let name = require(value.name, NAME)?;
        let item_range = require(value.item_range, ITEM_RANGE)?;
        Ok(Self {
            name: CategoryName::new(name).map_err(category_validation_error)?,
            item_range: ItemRange::new(item_range).map_err(category_validation_error)?,
        })
    }
}

/// Body for `PUT`/`PATCH /categories/{id}`; at least one field is required.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub item_range: Option<i32>,
}

impl TryFrom<UpdateCategoryRequest> for CategoryPatch {
    type Error = Error;

    fn try_from(value: UpdateCategoryRequest) -> Result<Self, Self::Error> {
        let name = value
            .name
            .map(CategoryName::new)
            .transpose()
            .map_err(category_validation_error)?;
        let item_range = value
            .item_range
            .map(ItemRange::new)
            .transpose()
            .map_err(category_validation_error)?;
        Self::new(name, item_range).map_err(category_validation_error)
    }
}

fn category_id(raw: &str) -> ApiResult<CategoryId> {
    let id = parse_identifier(raw, ID)?;
    CategoryId::new(id).map_err(category_validation_error)
}

/// List every category in id order.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = CategoryListResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CategoryListResponse>> {
    let categories = state.categories.list().await?;
    Ok(web::Json(CategoryListResponse {
        categories: categories.into_iter().map(CategoryDto::from).collect(),
    }))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "No such category", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let id = category_id(&path)?;
    let category = state.categories.get(id).await?;
    Ok(web::Json(CategoryResponse {
        category: category.into(),
    }))
}

/// Create a category; the store assigns the id.
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCategoryRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CategoryDraft::try_from(payload.into_inner())?;
    let category = state.categories.create(draft).await?;
    Ok(HttpResponse::Created().json(CategoryResponse {
        category: category.into(),
    }))
}

async fn update(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let id = category_id(&path)?;
    let patch = CategoryPatch::try_from(payload.into_inner())?;
    let category = state.categories.update(id, patch).await?;
    Ok(web::Json(CategoryResponse {
        category: category.into(),
    }))
}

/// Update the supplied fields of a category.
#[utoipa::path(
    put,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = CategoryResponse),
        (status = 400, description = "Invalid or empty update", body = ErrorSchema),
        (status = 404, description = "No such category", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/categories/{id}")]
pub async fn replace_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
) -> ApiResult<web::Json<CategoryResponse>> {
    update(state, path, payload).await
}

/// Alias of `PUT /categories/{id}`.
#[utoipa::path(
    patch,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = CategoryResponse),
        (status = 400, description = "Invalid or empty update", body = ErrorSchema),
        (status = 404, description = "No such category", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "patchCategory"
)]
#[patch("/categories/{id}")]
pub async fn patch_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
) -> ApiResult<web::Json<CategoryResponse>> {
    update(state, path, payload).await
}

/// Delete a category. Unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted or already absent", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = category_id(&path)?;
    state.categories.delete(id).await?;
    Ok(web::Json(MessageResponse::new("Category deleted")))
}

#[cfg(test)]
mod tests {
    //! Handler tests for the category endpoints.
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, call};
    use actix_web::http::StatusCode;
    use actix_web::test::{TestRequest, read_body_json};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn category(id: i32, name: &str, item_range: i32) -> Category {
        Category::new(
            CategoryId::new(id).expect("id"),
            CategoryName::new(name).expect("name"),
            ItemRange::new(item_range).expect("range"),
        )
    }

    fn detail_code(body: &Value) -> Option<&str> {
        body.get("details")
            .and_then(|d| d.get("code"))
            .and_then(Value::as_str)
    }

    #[actix_web::test]
    async fn list_wraps_categories() {
        let mut ports = MockPorts::default();
        ports
            .categories
            .expect_list()
            .return_once(|| Ok(vec![category(1, "Shop", 24), category(3, "Tools", 5)]));

        let response = call(ports, TestRequest::get().uri("/categories")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: CategoryListResponse = read_body_json(response).await;
        assert_eq!(
            body.categories,
            vec![
                CategoryDto {
                    id: 1,
                    name: "Shop".into(),
                    item_range: 24,
                },
                CategoryDto {
                    id: 3,
                    name: "Tools".into(),
                    item_range: 5,
                },
            ]
        );
    }

    #[actix_web::test]
    async fn get_missing_category_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .categories
            .expect_get()
            .with(eq(CategoryId::new(999).expect("id")))
            .return_once(|_| Err(Error::not_found("category 999 not found")));

        let response = call(ports, TestRequest::get().uri("/categories/999")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = read_body_json(response).await;
        assert_eq!(body["code"], "not_found");
    }

    #[rstest]
    #[case("abc")]
    #[case("-1")]
    #[case("0")]
    #[actix_web::test]
    async fn malformed_ids_are_rejected(#[case] raw: &str) {
        let mut ports = MockPorts::default();
        ports.categories.expect_get().never();

        let uri = format!("/categories/{raw}");
        let response = call(ports, TestRequest::get().uri(&uri)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(response).await;
        assert_eq!(detail_code(&body), Some("invalid_identifier"));
    }

    #[actix_web::test]
    async fn create_returns_created_category() {
        let mut ports = MockPorts::default();
        ports
            .categories
            .expect_create()
            .withf(|draft| draft.name.as_ref() == "Tools" && draft.item_range.get() == 5)
            .return_once(|draft| {
                Ok(Category::new(
                    CategoryId::new(4).expect("id"),
                    draft.name,
                    draft.item_range,
                ))
            });

        let request = TestRequest::post()
            .uri("/categories")
            .set_json(json!({"name": "Tools", "item_range": 5}));
        let response = call(ports, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: CategoryResponse = read_body_json(response).await;
        assert_eq!(
            body.category,
            CategoryDto {
                id: 4,
                name: "Tools".into(),
                item_range: 5,
            }
        );
    }

    #[rstest]
    #[case(json!({"item_range": 5}), "missing_field")]
    #[case(json!({"name": "Tools"}), "missing_field")]
    #[case(json!({"name": "  ", "item_range": 5}), "blank_field")]
    #[case(json!({"name": "Tools", "item_range": -1}), "negative_item_range")]
    #[actix_web::test]
    async fn create_validates_body(#[case] payload: Value, #[case] code: &str) {
        let mut ports = MockPorts::default();
        ports.categories.expect_create().never();

        let request = TestRequest::post().uri("/categories").set_json(payload);
        let response = call(ports, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(response).await;
        assert_eq!(detail_code(&body), Some(code));
    }

    #[rstest]
    #[case::put(TestRequest::put())]
    #[case::patch(TestRequest::patch())]
    #[actix_web::test]
    async fn update_applies_partial_patch(#[case] request: TestRequest) {
        let mut ports = MockPorts::default();
        ports
            .categories
            .expect_update()
            .withf(|id, patch| {
                id.get() == 2
                    && patch.name().is_none()
                    && patch.item_range().map(ItemRange::get) == Some(9)
            })
            .return_once(|_, _| Ok(category(2, "Garden", 9)));

        let request = request
            .uri("/categories/2")
            .set_json(json!({"item_range": 9}));
        let response = call(ports, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: CategoryResponse = read_body_json(response).await;
        assert_eq!(body.category.item_range, 9);
    }

    #[actix_web::test]
    async fn empty_update_is_rejected() {
        let mut ports = MockPorts::default();
        ports.categories.expect_update().never();

        let request = TestRequest::put().uri("/categories/2").set_json(json!({}));
        let response = call(ports, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(response).await;
        assert_eq!(detail_code(&body), Some("empty_patch"));
    }

    #[actix_web::test]
    async fn update_of_missing_category_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .categories
            .expect_update()
            .return_once(|_, _| Err(Error::not_found("category 8 not found")));

        let request = TestRequest::put()
            .uri("/categories/8")
            .set_json(json!({"name": "Garden"}));
        let response = call(ports, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_succeeds_for_any_id() {
        let mut ports = MockPorts::default();
        ports
            .categories
            .expect_delete()
            .times(1)
            .return_once(|_| Ok(()));

        let response = call(ports, TestRequest::delete().uri("/categories/42")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: MessageResponse = read_body_json(response).await;
        assert_eq!(body.message, "Category deleted");
    }
}
