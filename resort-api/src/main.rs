use resort_api::{app, AppState};
use resort_booking::BookingServices;
use resort_catalog::{ExtraBedPolicy, InventoryUnit, ProgramOffering, Room};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resort_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = resort_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Resort API on port {}", config.server.port);

    let store = Arc::new(resort_store::InMemoryBookingStore::new());
    let services = BookingServices {
        bookings: store.clone(),
        profiles: Arc::new(resort_store::InMemoryGuestProfiles::new()),
        notifications: Arc::new(resort_store::LoggingNotifier),
        transactions: Arc::new(resort_store::InMemoryTransactions::new()),
    };

    let (events_tx, _) = tokio::sync::broadcast::channel(config.events.broadcast_capacity);

    let state = AppState {
        catalog: Arc::new(resort_store::InMemoryCatalog::new(
            demo_cottages(),
            demo_programs(),
        )),
        services,
        store,
        events_tx,
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

// Demo inventory until the real catalog collaborator is wired in.
fn demo_cottages() -> Vec<InventoryUnit> {
    vec![
        InventoryUnit {
            id: Uuid::new_v4(),
            name: "Lakeview Cottage".to_string(),
            slug: "lakeview".to_string(),
            capacity_per_room: 2,
            price_per_night: 10_000_00,
            available: true,
            rooms_available: 5,
            extra_bed: ExtraBedPolicy {
                max_beds: 1,
                price_per_night: 1_500_00,
            },
            rooms: (1..=5)
                .map(|_| Room {
                    id: Uuid::new_v4(),
                    capacity: None,
                    price_per_night: None,
                })
                .collect(),
        },
        InventoryUnit {
            id: Uuid::new_v4(),
            name: "Forest Villa".to_string(),
            slug: "forest-villa".to_string(),
            capacity_per_room: 4,
            price_per_night: 18_000_00,
            available: true,
            rooms_available: 2,
            extra_bed: ExtraBedPolicy {
                max_beds: 0,
                price_per_night: 0,
            },
            rooms: vec![],
        },
    ]
}

fn demo_programs() -> Vec<ProgramOffering> {
    vec![
        ProgramOffering {
            id: Uuid::new_v4(),
            title: "Forest Spa".to_string(),
            price: 2_500_00,
            included_with_stay: false,
        },
        ProgramOffering {
            id: Uuid::new_v4(),
            title: "Morning Yoga".to_string(),
            price: 0,
            included_with_stay: true,
        },
    ]
}
