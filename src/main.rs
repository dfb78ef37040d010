use anyhow::Context;
use estate_flow::filters::{
    featured, filter_properties, FilterState, ListingStats, PriceRange, TypeFilter,
};
use estate_flow::listing::{InquiryForm, ListingForm};
use estate_flow::models::{Address, PropertyType};
use estate_flow::services::SearchFilters;
use estate_flow::{AppConfig, EntityService, Services};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.level)
                .with_context(|| format!("Invalid log level {:?}", config.logging.level))?,
        )
        .init();

    info!("🏠 EstateFlow - property listings");
    info!("==================================");

    let services = Services::seeded(&config)?;

    let properties = services.properties.get_all().await;
    info!("Loaded {} properties", properties.len());

    let stats = ListingStats::from(properties.as_slice());
    info!(
        "📊 {} properties · {} for sale · {} for rent · {} commercial",
        stats.total, stats.for_sale, stats.for_rent, stats.commercial
    );

    println!("Featured:");
    for (i, property) in featured(&properties).iter().enumerate() {
        println!("{}. {} ({})", i + 1, property.title, property.formatted_price());
        println!(
            "   {}, {} · {} bd, {} ba, {} sqft",
            property.address.city,
            property.address.state,
            property.bedrooms,
            property.bathrooms,
            property.area
        );
        println!("   Amenities: {}", property.amenities.join(", "));
        println!();
    }

    // Interactive filtering over the list already in hand
    let state = FilterState {
        search_term: String::new(),
        property_type: TypeFilter::Only(PropertyType::Residential),
        price_range: PriceRange {
            min: "500000".into(),
            max: String::new(),
        },
    };
    let filtered = filter_properties(&properties, &state);
    info!("{} residential listings from $500,000", filtered.len());

    // Server-side search
    let results = services
        .properties
        .search_properties(&SearchFilters {
            location: Some("ny".into()),
            bedrooms: Some(2),
            ..Default::default()
        })
        .await;
    for property in &results {
        println!("🔎 {} - {}", property.title, property.formatted_price());
    }

    // New listing through the form
    let mut form = ListingForm {
        title: "Sunny Studio".into(),
        price: "410000".into(),
        bedrooms: "1".into(),
        bathrooms: "1".into(),
        area: "520".into(),
        address: Address {
            street: "77 Hudson Street".into(),
            city: "New York".into(),
            state: "NY".into(),
            zip_code: "10013".into(),
        },
        description: "Compact studio with big windows".into(),
        ..Default::default()
    };
    for amenity in ["Laundry", "Rooftop Helipad"] {
        if !form.toggle_amenity(amenity) {
            warn!("Skipping unknown amenity {:?}", amenity);
        }
    }
    let listing = form.into_new_property(&mut rand::thread_rng())?;
    let created = services.properties.create(listing).await?;
    info!("✅ Listed {} as {}", created.title, created.id);

    // Inquiry about it
    let inquiry = InquiryForm {
        name: "Sarah Johnson".into(),
        email: "sarah.johnson@example.com".into(),
        phone: "(555) 123-4567".into(),
        message: "Could I see it on Saturday?".into(),
    }
    .into_new_inquiry(&created.id, Some("1"));
    services.inquiries.create(inquiry).await?;

    let user = services.users.save_property("1", &created.id).await?;
    info!("💾 {} has {} saved properties", user.name, user.saved_properties.len());

    if let Err(err) = services.properties.get_by_id("missing").await {
        warn!("Lookup failed as expected: {}", err);
    }

    let removed = services.delete_property_cascade(&created.id).await?;
    info!("🗑️ Removed {} with its inquiries", removed.title);

    Ok(())
}
