//! HTTP host for the report query service.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Body,
    extract::{Path as UrlPath, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::cli::ServeArgs;
use crate::commands::query::{
    Dataset, Facets, FilterCriteria, FilterParams, LinkedRecord, link_record,
};
use crate::model::ReportRecord;

mod error;
mod pages;
mod routes;

use error::{AppError, AppResult};
use pages::*;
use routes::*;

/// Shared state handed to every handler. The dataset is never written after
/// startup, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    context_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(dataset: Dataset, context_dir: PathBuf) -> Self {
        Self {
            dataset: Arc::new(dataset),
            context_dir: Arc::new(context_dir),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn context_dir(&self) -> &Path {
        &self.context_dir
    }
}

pub fn run(args: ServeArgs) -> Result<()> {
    let dataset = Dataset::load(&args.data_path)?;
    let state = AppState::new(dataset, args.context_dir.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    runtime.block_on(serve(&args, state))
}

async fn serve(args: &ServeArgs, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        addr = %addr,
        context_dir = %args.context_dir.display(),
        "query service listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("query service terminated with an error")?;

    info!("query service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
