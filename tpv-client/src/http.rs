//! HTTP client for the store server REST API
//!
//! The server speaks plain JSON: collections come back as bare arrays
//! and failures as `{"detail": "..."}` objects, so there is no
//! response envelope to unwrap. Product writes are the one multipart
//! surface (the image travels as a `file` part).

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::multipart;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    Categoria, CategoriaCreate, CategoriaUpdate, Cliente, ClienteCreate, ClienteUpdate,
    DetalleVenta, Devolucion, DevolucionCreate, Gasto, GastoCreate, GastoUpdate, Producto,
    ProductoForm, Usuario, Venta, VentaCreate,
};
use shared::{LoginRequest, LoginResponse};

/// An image file attached to a producto write
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// HTTP client with typed endpoint methods
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token (builder style)
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the authentication token in place
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        request
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request, discarding any response body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: multipart::Form,
    ) -> ClientResult<T> {
        let response = self.request(method, path).multipart(form).send().await?;
        Self::handle_response(response).await
    }

    /// Map a non-success response to an error, returning the response
    /// untouched otherwise
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        #[derive(serde::Deserialize)]
        struct DetailBody {
            detail: String,
        }

        let text = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<DetailBody>(&text) {
            Ok(body) => body.detail,
            Err(_) => text,
        };
        let detail = if detail.trim().is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            detail
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    /// Handle the HTTP response, decoding the body on success
    ///
    /// Transport failures while reading the body stay `Http`; a body
    /// that arrived but does not decode is `InvalidResponse`.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // ========== Auth API ==========

    /// Login with username and password
    ///
    /// The returned token is NOT stored automatically; call
    /// [`set_token`](Self::set_token) with it to authenticate
    /// subsequent requests.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post("login", &request).await
    }

    // ========== Productos API ==========

    pub async fn list_productos(&self) -> ClientResult<Vec<Producto>> {
        self.get("productos").await
    }

    pub async fn get_producto(&self, id: i64) -> ClientResult<Producto> {
        self.get(&format!("productos/{}", id)).await
    }

    /// Create a producto (multipart; `image` becomes the `file` part)
    pub async fn create_producto(
        &self,
        form: &ProductoForm,
        image: Option<ImageUpload>,
    ) -> ClientResult<Producto> {
        self.send_multipart(Method::POST, "productos", producto_multipart(form, image))
            .await
    }

    /// Replace a producto (multipart, same field set as create)
    pub async fn update_producto(
        &self,
        id: i64,
        form: &ProductoForm,
        image: Option<ImageUpload>,
    ) -> ClientResult<Producto> {
        self.send_multipart(
            Method::PUT,
            &format!("productos/{}", id),
            producto_multipart(form, image),
        )
        .await
    }

    pub async fn delete_producto(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("productos/{}", id)).await
    }

    // ========== Clientes API ==========

    pub async fn list_clientes(&self) -> ClientResult<Vec<Cliente>> {
        self.get("clientes").await
    }

    pub async fn create_cliente(&self, payload: &ClienteCreate) -> ClientResult<Cliente> {
        self.post("clientes", payload).await
    }

    pub async fn update_cliente(&self, id: i64, payload: &ClienteUpdate) -> ClientResult<Cliente> {
        self.put(&format!("clientes/{}", id), payload).await
    }

    pub async fn delete_cliente(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("clientes/{}", id)).await
    }

    // ========== Categorias API ==========

    pub async fn list_categorias(&self) -> ClientResult<Vec<Categoria>> {
        self.get("categorias").await
    }

    pub async fn create_categoria(&self, payload: &CategoriaCreate) -> ClientResult<Categoria> {
        self.post("categorias", payload).await
    }

    pub async fn update_categoria(
        &self,
        id: i64,
        payload: &CategoriaUpdate,
    ) -> ClientResult<Categoria> {
        self.put(&format!("categorias/{}", id), payload).await
    }

    pub async fn delete_categoria(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("categorias/{}", id)).await
    }

    // ========== Gastos API ==========

    pub async fn list_gastos(&self) -> ClientResult<Vec<Gasto>> {
        self.get("gastos").await
    }

    pub async fn create_gasto(&self, payload: &GastoCreate) -> ClientResult<Gasto> {
        self.post("gastos", payload).await
    }

    pub async fn update_gasto(&self, id: i64, payload: &GastoUpdate) -> ClientResult<Gasto> {
        self.put(&format!("gastos/{}", id), payload).await
    }

    pub async fn delete_gasto(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("gastos/{}", id)).await
    }

    // ========== Ventas API ==========

    /// Submit a sale
    pub async fn create_venta(&self, payload: &VentaCreate) -> ClientResult<Venta> {
        self.post("ventas", payload).await
    }

    pub async fn list_ventas(&self) -> ClientResult<Vec<Venta>> {
        self.get("ventas").await
    }

    pub async fn get_venta(&self, id: i64) -> ClientResult<Venta> {
        self.get(&format!("ventas/{}", id)).await
    }

    /// Lines of one recorded sale
    pub async fn venta_detalles(&self, venta_id: i64) -> ClientResult<Vec<DetalleVenta>> {
        self.get(&format!("detalle_ventas/venta/{}", venta_id)).await
    }

    // ========== Devoluciones API ==========

    pub async fn list_devoluciones(&self) -> ClientResult<Vec<Devolucion>> {
        self.get("devoluciones").await
    }

    pub async fn get_devolucion(&self, id: i64) -> ClientResult<Devolucion> {
        self.get(&format!("devoluciones/{}", id)).await
    }

    pub async fn create_devolucion(&self, payload: &DevolucionCreate) -> ClientResult<Devolucion> {
        self.post("devoluciones", payload).await
    }

    // ========== Usuarios API ==========

    pub async fn list_usuarios(&self) -> ClientResult<Vec<Usuario>> {
        self.get("usuarios").await
    }

    pub async fn get_usuario(&self, id: i64) -> ClientResult<Usuario> {
        self.get(&format!("usuarios/{}", id)).await
    }
}

/// Multipart part name the server reads the product image from
const IMAGE_PART: &str = "file";

/// Flatten a producto form into named text values, the way the server
/// reads them from the multipart body
fn producto_fields(form: &ProductoForm) -> Vec<(&'static str, String)> {
    vec![
        ("nombre", form.nombre.clone()),
        ("codigo", form.codigo.clone()),
        ("descripcion", form.descripcion.clone()),
        ("stock_actual", form.stock_actual.to_string()),
        ("stock_bajo", form.stock_bajo.to_string()),
        ("precio_costo", form.precio_costo.to_string()),
        ("margen", form.margen.to_string()),
        ("precio_unitario", form.precio_unitario.to_string()),
        ("categoria_id", form.categoria_id.to_string()),
        ("activo", form.activo.to_string()),
    ]
}

/// Assemble the multipart body for a producto write (every scalar as
/// text, the image as a `file` part)
fn producto_multipart(form: &ProductoForm, image: Option<ImageUpload>) -> multipart::Form {
    let mut parts = multipart::Form::new();
    for (name, value) in producto_fields(form) {
        parts = parts.text(name, value);
    }

    if let Some(image) = image {
        parts = parts.part(
            IMAGE_PART,
            multipart::Part::bytes(image.bytes).file_name(image.file_name),
        );
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&ClientConfig::new("http://localhost:8000/"))
    }

    fn response_with(status: u16, body: &'static str) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body(body)
            .unwrap()
            .into()
    }

    #[test]
    fn url_joins_without_double_slash() {
        let api = client();
        assert_eq!(api.url("productos"), "http://localhost:8000/productos");
        assert_eq!(api.url("/ventas/3"), "http://localhost:8000/ventas/3");
    }

    #[test]
    fn auth_header_present_only_with_token() {
        let api = client();
        assert!(api.auth_header().is_none());
        let api = api.with_token("abc");
        assert_eq!(api.auth_header().as_deref(), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn non_2xx_decodes_detail_body() {
        let response = response_with(400, r#"{"detail":"Stock insuficiente"}"#);
        let err = ApiClient::handle_response::<serde_json::Value>(response)
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "Stock insuficiente");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_text() {
        let response = response_with(500, "gateway exploded");
        let err = ApiClient::handle_response::<serde_json::Value>(response)
            .await
            .unwrap_err();
        assert_eq!(err.detail(), Some("gateway exploded"));
    }

    #[tokio::test]
    async fn empty_error_body_gets_generic_detail() {
        let response = response_with(503, "");
        let err = ApiClient::handle_response::<serde_json::Value>(response)
            .await
            .unwrap_err();
        assert_eq!(err.detail(), Some("HTTP 503"));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_its_own_variant() {
        let response = response_with(401, r#"{"detail":"expired"}"#);
        let err = ApiClient::handle_response::<serde_json::Value>(response)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[tokio::test]
    async fn success_decodes_plain_arrays() {
        let response = response_with(200, r#"[{"id":1,"nombre":"General"}]"#);
        let cats: Vec<Categoria> = ApiClient::handle_response(response).await.unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].nombre, "General");
    }

    #[tokio::test]
    async fn malformed_success_body_is_invalid_response() {
        // A proxy serving an HTML page with a 200 must not surface as
        // a transport error
        let response = response_with(200, "<html>mantenimiento</html>");
        let err = ApiClient::handle_response::<Vec<Categoria>>(response)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert!(err.to_string().starts_with("Invalid response:"));
    }

    #[test]
    fn producto_form_flattens_to_the_server_field_set() {
        let form = ProductoForm {
            nombre: "Arroz 1kg".to_string(),
            codigo: "ARZ001".to_string(),
            descripcion: String::new(),
            stock_actual: 24,
            stock_bajo: 5,
            precio_costo: 1.1,
            margen: 36.5,
            precio_unitario: 1.5,
            categoria_id: 2,
            activo: true,
        };

        let fields = producto_fields(&form);
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "nombre",
                "codigo",
                "descripcion",
                "stock_actual",
                "stock_bajo",
                "precio_costo",
                "margen",
                "precio_unitario",
                "categoria_id",
                "activo",
            ]
        );
        assert_eq!(fields[3].1, "24");
        assert_eq!(fields[5].1, "1.1");
        assert_eq!(fields[9].1, "true");
        assert_eq!(IMAGE_PART, "file");
    }
}
