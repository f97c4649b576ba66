//! Barcode to nutrition lookup against the Open Food Facts product API.
//!
//! One request per scan: no retry, no cache. A failed lookup changes nothing.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, Result};

pub const DEFAULT_API_BASE: &str = "https://world.openfoodfacts.org";

/// Product data extracted from a lookup. Nutriments are per 100 g and
/// `None` when the database has no value, so the user can fill them in.
#[derive(Clone, Debug, PartialEq)]
pub struct ScannedProduct {
    pub code: String,
    pub name: String,
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub sugar: Option<f64>,
    pub protein: Option<f64>,
}

/// Anything that can resolve a barcode to a product.
pub trait ProductSource {
    fn lookup(&self, code: &str) -> Result<ScannedProduct>;
}

pub struct OpenFoodFacts {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl OpenFoodFacts {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("staystrong/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(OpenFoodFacts {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn product_url(&self, code: &str) -> String {
        format!("{}/api/v0/product/{}.json", self.base_url, code)
    }
}

impl ProductSource for OpenFoodFacts {
    fn lookup(&self, code: &str) -> Result<ScannedProduct> {
        let code = validate_code(code)?;
        let url = self.product_url(code);
        tracing::debug!(%url, "looking up product");

        // The API answers unknown codes with a 404 carrying a regular JSON
        // body, so only server errors short-circuit before decoding.
        let response = self.client.get(&url).send()?;
        let response = if response.status().is_server_error() {
            response.error_for_status()?
        } else {
            response
        };
        let body: ProductResponse = response.json()?;
        let product = body.into_product(code)?;
        tracing::info!(code, name = %product.name, "product found");
        Ok(product)
    }
}

/// Trims the scanned code and rejects blank input before any request.
pub fn validate_code(code: &str) -> Result<&str> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::validation("barcode", "cannot be empty"));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::validation("barcode", "may only contain letters and digits"));
    }
    Ok(code)
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    status: i64,
    product: Option<ProductBody>,
}

#[derive(Debug, Deserialize)]
struct ProductBody {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    nutriments: Nutriments,
}

#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g", default, deserialize_with = "lenient_number")]
    energy_kcal_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    fat_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    sugars_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    proteins_100g: Option<f64>,
}

impl ProductResponse {
    fn into_product(self, code: &str) -> Result<ScannedProduct> {
        let not_found = || AppError::ProductNotFound {
            code: code.to_string(),
        };
        if self.status != 1 {
            return Err(not_found());
        }
        let body = self.product.ok_or_else(not_found)?;
        Ok(ScannedProduct {
            code: code.to_string(),
            name: body.product_name.unwrap_or_default().trim().to_string(),
            calories: body.nutriments.energy_kcal_100g,
            fat: body.nutriments.fat_100g,
            sugar: body.nutriments.sugars_100g,
            protein: body.nutriments.proteins_100g,
        })
    }
}

// The API serves nutriments as numbers, but some products carry strings.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Serves a single canned HTTP response on a local port and returns its base URL.
#[cfg(test)]
pub(crate) fn serve_once(status: &'static str, body: &'static str) -> String {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 4096];
        let _ = stream.read(&mut request);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    format!("http://{addr}")
}
