use serde::Deserialize;
use tempfile::TempDir;
use thiserror::Error;
use tracing::info;

use std::{fs::File, path::Path};

use crate::{
    app::App,
    query::GENRE_KEYWORDS,
    types::{ImdbId, ResultType},
};

#[derive(Error, Debug)]
pub enum ClientExtractionError {
    #[error("failed to create temp dir")]
    CreateDir(#[source] std::io::Error),
    #[error("failed to open tarball")]
    Open(#[source] std::io::Error),
    #[error("failed to unpack tarball")]
    Unpack(#[source] std::io::Error),
}

fn extract_client() -> Result<TempDir, ClientExtractionError> {
    use ClientExtractionError::*;
    let d = TempDir::new().map_err(CreateDir)?;
    let tarball_path = Path::new(env!("OUT_DIR")).join("client.tar");
    let tarball_reader = File::open(tarball_path).map_err(Open)?;
    let mut tarball = tar::Archive::new(tarball_reader);
    tarball.unpack(&d).map_err(Unpack)?;
    Ok(d)
}

async fn handle_categories(req: tide::Request<App>) -> tide::Result<serde_json::Value> {
    let app = req.state();
    Ok(serde_json::json!({
        "featured": app.categories(),
        "genres": GENRE_KEYWORDS,
        "result_types": ResultType::VARIANTS,
    }))
}

#[derive(Deserialize)]
struct ListingQueryParams {
    search: Option<String>,
}

async fn handle_listing(req: tide::Request<App>) -> tide::Result<serde_json::Value> {
    let app = req.state();
    let params: ListingQueryParams = req.query()?;
    let snapshot = app.navigate(params.search.as_deref()).await?;
    Ok(serde_json::to_value(snapshot)?)
}

#[derive(Debug, Deserialize)]
struct CategoryRequest {
    index: usize,
}

async fn handle_category(mut req: tide::Request<App>) -> tide::Result<serde_json::Value> {
    let request: CategoryRequest = req.body_json().await?;
    let app = req.state();
    Ok(serde_json::to_value(app.select_category(request.index).await)?)
}

#[derive(Debug, Deserialize)]
struct TypeRequest {
    #[serde(rename = "type")]
    result_type: ResultType,
}

async fn handle_type(mut req: tide::Request<App>) -> tide::Result<serde_json::Value> {
    let request: TypeRequest = req.body_json().await?;
    let app = req.state();
    Ok(serde_json::to_value(app.select_type(request.result_type).await)?)
}

#[derive(Debug, Deserialize)]
struct PageRequest {
    page: u64,
}

async fn handle_page(mut req: tide::Request<App>) -> tide::Result<serde_json::Value> {
    let request: PageRequest = req.body_json().await?;
    let app = req.state();
    Ok(serde_json::to_value(app.go_to_page(request.page).await)?)
}

async fn handle_movie(req: tide::Request<App>) -> tide::Result<serde_json::Value> {
    let app = req.state();
    let id = ImdbId(req.param("id")?.to_string());
    Ok(serde_json::to_value(app.movie(&id).await)?)
}

#[derive(Error, Debug)]
pub enum ServerCreationError {
    #[error("failed to extract client")]
    ExtractClient(#[from] ClientExtractionError),
    #[error("failed to serve directory")]
    ServeDir(#[source] std::io::Error),
}

pub struct Server {
    app: tide::Server<App>,
    _embedded_html_dir: TempDir,
}

impl Server {
    pub fn new(data_path: Option<&Path>, app: App) -> Result<Server, ServerCreationError> {
        let mut app = tide::with_state(app);
        let embedded_html_dir = extract_client()?;

        app.at("/").get(tide::Redirect::new("/index.html"));
        if let Some(data_path) = data_path {
            info!("Overriding embedded html with {}", data_path.display());
            app.at("/")
                .serve_dir(data_path)
                .map_err(ServerCreationError::ServeDir)?;
        } else {
            app.at("/")
                .serve_dir(&embedded_html_dir)
                .map_err(ServerCreationError::ServeDir)?;
        }

        app.at("/api/categories").get(handle_categories);
        app.at("/api/listing").get(handle_listing);
        app.at("/api/listing/category").put(handle_category);
        app.at("/api/listing/type").put(handle_type);
        app.at("/api/listing/page").put(handle_page);
        app.at("/api/movie/:id").get(handle_movie);

        Ok(Server {
            app,
            _embedded_html_dir: embedded_html_dir,
        })
    }

    pub async fn serve(self, port: u16) -> std::io::Result<()> {
        info!("Serving on http://127.0.0.1:{port}");
        self.app.listen(format!("127.0.0.1:{port}")).await
    }
}
