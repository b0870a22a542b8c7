use super::*;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/meta", get(meta))
        .route("/api/reports", get(reports))
        .route("/api/municipalities/:slug", get(municipality_reports))
        .route("/municipality/:slug", get(municipality_page))
        .route("/pdf/*filename", get(source_pdf))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn meta(State(state): State<AppState>) -> Json<Facets> {
    Json(state.dataset().list_facets().clone())
}

async fn reports(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let criteria = FilterCriteria::from_params(&FilterParams::from_pairs(pairs));
    let results = state
        .dataset()
        .filter(&criteria)
        .into_iter()
        .map(link_record)
        .collect::<Vec<LinkedRecord<'_>>>();

    Json(results).into_response()
}

async fn municipality_reports(
    State(state): State<AppState>,
    UrlPath(slug): UrlPath<String>,
) -> AppResult<Response> {
    let entries = lookup_or_not_found(state.dataset(), &slug)?;
    let results = entries
        .into_iter()
        .map(link_record)
        .collect::<Vec<LinkedRecord<'_>>>();

    Ok(Json(results).into_response())
}

async fn municipality_page(
    State(state): State<AppState>,
    UrlPath(slug): UrlPath<String>,
) -> AppResult<Html<String>> {
    let entries = lookup_or_not_found(state.dataset(), &slug)?;
    Ok(Html(render_municipality_page(&entries)))
}

async fn source_pdf(
    State(state): State<AppState>,
    UrlPath(filename): UrlPath<String>,
) -> AppResult<Response> {
    if !is_plain_file_name(&filename) {
        return Err(AppError::NotFound(format!("pdf {filename}")));
    }

    let path = state.context_dir().join(&filename);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("pdf {filename}")));
        }
        Err(err) => return Err(err.into()),
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{filename}\""),
        )
        .body(Body::from(bytes))
        .map_err(|err| AppError::Internal(err.to_string()))
}

fn lookup_or_not_found<'a>(dataset: &'a Dataset, slug: &str) -> AppResult<Vec<&'a ReportRecord>> {
    dataset
        .lookup(slug)
        .ok_or_else(|| AppError::NotFound(format!("municipality {slug}")))
}

/// Only bare names inside the context directory are served.
pub(super) fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}
