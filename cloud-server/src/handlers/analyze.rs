//! Analysis handlers
//!
//! One endpoint per modality. Response field names match what the
//! dashboard renders verbatim, so they stay camelCase on the wire.

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use phishguard_core::features::url::UrlFeatures;

use crate::{AppError, AppResult, AppState};

// ============================================================================
// URL
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub is_phishing: bool,
    pub confidence: u8,
    pub tags: Vec<String>,
    pub features: UrlFeatures,
}

/// Analyze a URL
pub async fn url(
    State(state): State<AppState>,
    Json(req): Json<UrlRequest>,
) -> AppResult<Json<UrlResponse>> {
    let analysis = state.service.analyze_url(&req.url).await?;

    Ok(Json(UrlResponse {
        is_phishing: analysis.verdict.is_malicious,
        confidence: analysis.verdict.confidence,
        tags: analysis.verdict.tags,
        features: analysis.features,
    }))
}

// ============================================================================
// EMAIL
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailResponse {
    pub is_phishing: bool,
    pub risk_score: u8,
    pub threat_tags: Vec<String>,
    pub recommendation: String,
}

/// Analyze email content
pub async fn email(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> AppResult<Json<EmailResponse>> {
    let verdict = state.service.analyze_email(&req.content).await?;

    Ok(Json(EmailResponse {
        is_phishing: verdict.is_malicious,
        risk_score: verdict.confidence,
        threat_tags: verdict.tags,
        recommendation: verdict.recommendation,
    }))
}

// ============================================================================
// QR
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QrRequest {
    /// Decoded QR payload bytes, base64-encoded for JSON transport. The
    /// optical image decode happens client-side.
    pub image: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrResponse {
    pub is_malicious: bool,
    pub extracted_content: String,
    pub content_type: &'static str,
    pub risk_score: u8,
    pub recommendation: String,
}

/// Scan a QR payload
pub async fn qr(
    State(state): State<AppState>,
    Json(req): Json<QrRequest>,
) -> AppResult<Json<QrResponse>> {
    let payload = BASE64
        .decode(req.image.trim())
        .map_err(|_| AppError::InvalidInput("image must be base64-encoded".into()))?;

    let analysis = state.service.scan_qr(&payload).await?;

    Ok(Json(QrResponse {
        is_malicious: analysis.verdict.is_malicious,
        extracted_content: analysis.extracted_content,
        content_type: analysis.content_type.as_str(),
        risk_score: analysis.verdict.confidence,
        recommendation: analysis.verdict.recommendation,
    }))
}

// ============================================================================
// DOMAIN
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DomainRequest {
    pub domain: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResponse {
    pub is_impersonating: bool,
    pub suspicious_features: Vec<String>,
    pub legitimate_domain: Option<String>,
    pub risk_score: u8,
    pub recommendation: String,
}

/// Check a domain against the known brand set
pub async fn domain(
    State(state): State<AppState>,
    Json(req): Json<DomainRequest>,
) -> AppResult<Json<DomainResponse>> {
    let analysis = state.service.check_domain(&req.domain).await?;

    Ok(Json(DomainResponse {
        is_impersonating: analysis.verdict.is_malicious,
        suspicious_features: analysis.verdict.tags,
        legitimate_domain: analysis.legitimate_domain,
        risk_score: analysis.verdict.confidence,
        recommendation: analysis.verdict.recommendation,
    }))
}
