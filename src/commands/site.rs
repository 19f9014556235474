use crate::error::{FarmError, FarmResult};
use crate::state::AppState;
use axum::{extract::State as AxumState, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// The public catalog, as printed on the products page.
pub async fn get_products_axum() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Fresh A2 Milk", "price": 80, "unit": "liter",
          "description": "Pure, fresh A2 milk from our Gir cows, delivered daily" },
        { "id": 2, "name": "A2 Ghee", "price": 3000, "unit": "kg",
          "description": "Traditional ghee made from A2 milk, rich in flavor and nutrition" },
        { "id": 3, "name": "Fresh Paneer", "price": 320, "unit": "kg",
          "description": "Soft, fresh paneer made from pure A2 milk" },
        { "id": 4, "name": "A2 Curd", "price": 60, "unit": "500g",
          "description": "Creamy, probiotic-rich curd made from fresh A2 milk" },
        { "id": 5, "name": "Buttermilk", "price": 40, "unit": "500ml",
          "description": "Refreshing traditional buttermilk, perfect for digestion" },
        { "id": 6, "name": "A2 Cheese", "price": 450, "unit": "250g",
          "description": "Artisanal cheese crafted from premium A2 milk" }
    ]))
}

pub async fn get_blogs_axum() -> Json<Value> {
    Json(json!([
        { "id": 1, "title": "The Sacred Gir Cow: India's Ancient Treasure",
          "excerpt": "Discover the rich history and unique characteristics of Gir cows, one of India's most revered cattle breeds.",
          "author": "Dr. Ramesh Patel", "date": "March 15, 2024", "readTime": "5 min read" },
        { "id": 2, "title": "A2 vs A1 Milk: Understanding the Difference",
          "excerpt": "Learn about the science behind A2 milk and why it's considered superior for human health and digestion.",
          "author": "Nutritionist Priya Pathak", "date": "March 10, 2024", "readTime": "7 min read" },
        { "id": 3, "title": "Sustainable Dairy Farming: Our Approach",
          "excerpt": "How we maintain eco-friendly practices while ensuring the highest quality milk production at Ram Dairy Farm.",
          "author": "Farm Manager Sunil Kumar", "date": "March 5, 2024", "readTime": "6 min read" },
        { "id": 4, "title": "The Nutritional Benefits of Fresh Ghee",
          "excerpt": "Explore the ancient wisdom behind ghee consumption and its modern health benefits when made from A2 milk.",
          "author": "Ayurveda Expert Dr. Meera Joshi", "date": "February 28, 2024", "readTime": "4 min read" },
        { "id": 5, "title": "From Farm to Table: Our Quality Process",
          "excerpt": "Take a behind-the-scenes look at how we ensure the highest quality from milking to delivery.",
          "author": "Quality Manager Rajesh Mehta", "date": "February 22, 2024", "readTime": "8 min read" },
        { "id": 6, "title": "Traditional Cow Care Methods",
          "excerpt": "How ancient Indian practices of cow care contribute to better milk quality and cow welfare.",
          "author": "Veterinarian Dr. Amit Patel", "date": "February 15, 2024", "readTime": "6 min read" }
    ]))
}

#[derive(Deserialize, Serialize)]
pub struct CartItem {
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
}

#[derive(Deserialize, Serialize)]
pub struct PublicOrderInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<CartItem>,
}

#[derive(Serialize)]
pub struct PublicOrderResponse {
    pub created: usize,
}

/// The public order form: one pending order row per cart item, dated today.
/// These rows carry the submitted free-text name and no customer link.
pub async fn submit_public_order_axum(
    AxumState(state): AxumState<AppState>,
    Json(input): Json<PublicOrderInput>,
) -> FarmResult<Json<PublicOrderResponse>> {
    if input.name.trim().is_empty() {
        return Err(FarmError::Validation("Name is required.".into()));
    }
    if input.items.is_empty() {
        return Err(FarmError::Validation(
            "Cart is empty. Please add some products first.".into(),
        ));
    }
    for item in &input.items {
        if item.name.trim().is_empty() || item.quantity <= 0.0 {
            return Err(FarmError::Validation(
                "Every cart item needs a name and a positive quantity.".into(),
            ));
        }
    }

    let today = Local::now().date_naive();
    let mut tx = state.pool.begin().await?;
    for item in &input.items {
        let id = crate::db::new_row_id("ORD");
        sqlx::query(
            "INSERT INTO orders (id, customer_name, order_date, status, item, quantity)
             VALUES ($1, $2, $3, 'pending', $4, $5)",
        )
        .bind(&id)
        .bind(input.name.trim())
        .bind(today)
        .bind(&item.name)
        .bind(item.quantity)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!(
        "Public order from {}: {} item(s)",
        input.name.trim(),
        input.items.len()
    );
    Ok(Json(PublicOrderResponse {
        created: input.items.len(),
    }))
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitBookingInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub visit_date: String,
    pub plan: Option<String>,
    pub participants: Option<i32>,
    pub message: Option<String>,
}

/// Farm-visit booking: validated, then handed to the email collaborator.
/// Dispatch is fire-and-forget; a failed send never fails the booking.
pub async fn book_farm_visit_axum(
    Json(input): Json<VisitBookingInput>,
) -> FarmResult<Json<()>> {
    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(FarmError::Validation("Name and email are required.".into()));
    }
    if crate::commands::order::utils::parse_date_safe(&input.visit_date).is_none() {
        return Err(FarmError::Validation(
            "Visit date is required (YYYY-MM-DD).".into(),
        ));
    }

    let mut params = HashMap::new();
    params.insert("name".to_string(), input.name.trim().to_string());
    params.insert("email".to_string(), input.email.trim().to_string());
    params.insert("visit_date".to_string(), input.visit_date.clone());
    if let Some(phone) = input.phone.filter(|p| !p.trim().is_empty()) {
        params.insert("phone".to_string(), phone);
    }
    if let Some(plan) = input.plan.filter(|p| !p.trim().is_empty()) {
        params.insert("plan".to_string(), plan);
    }
    if let Some(participants) = input.participants {
        params.insert("participants".to_string(), participants.to_string());
    }
    if let Some(message) = input.message.filter(|m| !m.trim().is_empty()) {
        params.insert("message".to_string(), message);
    }

    crate::notify::dispatch_template_email("farm_visit_booking", params);

    Ok(Json(()))
}
