//! Scripted register session against a canned in-process API
//!
//! Walks the whole protocol without a server:
//! 1. Load the catalog
//! 2. Scan products (two-step confirmation, including a failed scan)
//! 3. Apply discounts (and hit the mutual-exclusion rule)
//! 4. Submit the sale and print the ticket
//! 5. React to a pushed stock update
//!
//! Run: cargo run -p tpv-pos --example scripted_sale

use async_trait::async_trait;
use shared::{Cliente, Producto, Venta, VentaCreate};
use tokio::sync::broadcast;
use tpv_client::{ClientResult, EventFeed, MemoryFeed, RealtimeEvent};
use tpv_pos::money::{price_from_cost, to_f64};
use tpv_pos::{PosSession, ReceiptData, ReceiptSink, SaleApi, ScanOutcome, TicketRenderer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("\n🧾 Scripted Register Session");
    println!("============================\n");

    let api = CannedApi::new();
    let mut pos = PosSession::new(api, 1).with_receipt_sink(Box::new(ConsoleSink::new()));

    // 1. Catalog
    pos.load_catalog().await?;
    println!(
        "📦 Catalog ready: {} productos, {} clientes",
        pos.catalog().productos().len(),
        pos.catalog().clientes().len()
    );

    // 2. A misread scan first
    pos.edit_input("XXX999");
    if let Err(e) = pos.commit_input() {
        println!("❌ Scan rejected: {}", e);
    }

    // Then real ones: first commit previews, identical repeat confirms
    for text in ["2xARZ001", "COC001", "COC001"] {
        pos.edit_input(text);
        report(pos.commit_input()?);
        report(pos.commit_input()?);
    }

    // 3. Discounts are either per line or global, never both
    pos.set_line_discount(2, 25.0);
    if let Err(e) = pos.set_global_discount(10.0) {
        println!("❌ Global discount refused: {}", e);
    }
    pos.set_line_discount(2, 0.0);
    pos.set_global_discount(10.0)?;
    println!(
        "💰 Subtotal {:.2}, con descuento global {:.0}% queda {:.2}",
        to_f64(pos.cart().subtotal()),
        pos.cart().global_discount(),
        to_f64(pos.cart().total())
    );

    // 4. Checkout prints the ticket through the sink
    pos.select_customer(Some(7));
    let venta = pos.submit_sale().await?;
    println!("✅ Venta #{} registrada, total {:.2}\n", venta.id, venta.total);

    // 5. A stock push from another terminal
    let (tx, _) = broadcast::channel(16);
    let feed = EventFeed::start(MemoryFeed::new(&tx));
    let mut events = feed.subscribe();

    tx.send(RealtimeEvent::StockUpdate {
        producto_id: 1,
        new_stock: 2,
    })?;
    let event = events.recv().await?;
    pos.apply_event(&event);

    println!("📉 Bajo stock tras la actualización:");
    for p in pos.catalog().low_stock() {
        println!("   {} ({} restantes)", p.nombre, p.stock_actual);
    }

    Ok(())
}

fn report(outcome: ScanOutcome) {
    match outcome {
        ScanOutcome::Pending {
            nombre, cantidad, ..
        } => println!("🔎 {} x{}: repite el escaneo para confirmar", nombre, cantidad),
        ScanOutcome::Added {
            producto_id,
            cantidad,
            low_stock,
        } => {
            let warn = if low_stock { " (stock bajo)" } else { "" };
            println!("🛒 Añadido producto {} x{}{}", producto_id, cantidad, warn);
        }
    }
}

/// In-process stand-in for the store server
#[derive(Debug, Clone)]
struct CannedApi {
    productos: Vec<Producto>,
    clientes: Vec<Cliente>,
}

impl CannedApi {
    fn new() -> Self {
        Self {
            productos: vec![
                producto(1, "ARZ001", "Arroz 1kg", 1.0, 50.0, 6),
                producto(2, "COC001", "Coca Cola 500ml", 0.8, 50.0, 24),
            ],
            clientes: vec![Cliente {
                id: 7,
                nombre: "María García".to_string(),
                documento: "12345678".to_string(),
                direccion: "Av. Principal 100".to_string(),
                telefono: "555-0100".to_string(),
                activo: true,
            }],
        }
    }
}

#[async_trait]
impl SaleApi for CannedApi {
    async fn fetch_productos(&self) -> ClientResult<Vec<Producto>> {
        Ok(self.productos.clone())
    }

    async fn fetch_clientes(&self) -> ClientResult<Vec<Cliente>> {
        Ok(self.clientes.clone())
    }

    async fn submit_venta(&self, venta: &VentaCreate) -> ClientResult<Venta> {
        let total_sin_descuento: f64 = venta.detalles.iter().map(|d| d.subtotal).sum();
        Ok(Venta {
            id: 42,
            cliente_id: venta.cliente_id,
            usuario_id: venta.usuario_id,
            fecha: chrono::Utc::now().to_rfc3339(),
            descuento: venta.descuento,
            total: total_sin_descuento * (1.0 - venta.descuento / 100.0),
            total_sin_descuento,
        })
    }
}

/// Prints each ticket to stdout as it is emitted
struct ConsoleSink {
    renderer: TicketRenderer,
}

impl ConsoleSink {
    fn new() -> Self {
        Self {
            renderer: TicketRenderer::new(32),
        }
    }
}

impl ReceiptSink for ConsoleSink {
    fn emit(&mut self, receipt: &ReceiptData) {
        println!("{}", self.renderer.render(receipt));
    }
}

fn producto(
    id: i64,
    codigo: &str,
    nombre: &str,
    precio_costo: f64,
    margen: f64,
    stock: i64,
) -> Producto {
    Producto {
        id,
        nombre: nombre.to_string(),
        codigo: codigo.to_string(),
        codigo_barras: None,
        descripcion: String::new(),
        stock_actual: stock,
        stock_bajo: 3,
        precio_costo,
        margen,
        precio_unitario: price_from_cost(precio_costo, margen),
        categoria_id: 1,
        activo: true,
        image_url: None,
    }
}
