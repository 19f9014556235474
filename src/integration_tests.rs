#[cfg(test)]
mod tests {
    use crate::commands::cow::{create_cow_internal, CowInput};
    use crate::commands::customer::{create_customer_internal, CustomerInput};
    use crate::commands::order::weekly::{generate_weekly_orders_internal, WeeklyOrder};
    use crate::commands::order::{create_order_internal, OrderInput};
    use crate::db::{self, Cow, DbPool, Order};

    async fn setup_test_db() -> DbPool {
        dotenvy::dotenv().ok();
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        db::init_pool(&database_url)
            .await
            .expect("Failed to create pool")
    }

    fn cow_input(name: &str) -> CowInput {
        CowInput {
            id: None,
            name: name.to_string(),
            gender: Some("FEMALE".to_string()),
            age: Some(38),
            birthdate: Some("2021-06-01".to_string()),
            lactation: Some(true),
            lactation_day: Some("Day 120".to_string()),
            mother: Some("Ganga".to_string()),
            father: None,
            origin: Some("Gir".to_string()),
            comments: None,
        }
    }

    #[tokio::test]
    async fn test_cow_crud_round_trip() {
        let pool = setup_test_db().await;

        let id = create_cow_internal(&pool, cow_input("Test Cow (Integration)"))
            .await
            .expect("create_cow_internal failed");

        let cow: Cow = sqlx::query_as("SELECT * FROM cows WHERE id = $1")
            .bind(&id)
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch created cow");

        assert_eq!(cow.name, "Test Cow (Integration)");
        assert_eq!(cow.gender.as_deref(), Some("FEMALE"));
        assert_eq!(cow.age, Some(38));
        assert_eq!(cow.lactation, Some(true));

        let _ = sqlx::query("DELETE FROM cows WHERE id = $1")
            .bind(&id)
            .execute(&pool)
            .await;

        let gone: Option<(String,)> = sqlx::query_as("SELECT id FROM cows WHERE id = $1")
            .bind(&id)
            .fetch_optional(&pool)
            .await
            .expect("Failed to re-query cow");
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn test_order_create_resolves_customer_name() {
        let pool = setup_test_db().await;

        let customer_id = create_customer_internal(
            &pool,
            CustomerInput {
                id: None,
                name: "Integration Customer".to_string(),
                quantity: Some(2.0),
                unit: Some("liter".to_string()),
                contact_number: None,
                area: None,
                address: None,
                geopin: None,
                delivery_agent: None,
            },
        )
        .await
        .expect("create_customer_internal failed");

        let order_id = create_order_internal(
            &pool,
            OrderInput {
                id: None,
                customer_id: Some(customer_id.clone()),
                customer_name: None,
                order_date: "2024-02-05".to_string(),
                status: None,
                item: "Milk".to_string(),
                quantity: 2.0,
            },
        )
        .await
        .expect("create_order_internal failed");

        let order: Order = sqlx::query_as("SELECT * FROM orders WHERE id = $1")
            .bind(&order_id)
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch created order");

        // The denormalized name comes from the customers table, not the input.
        assert_eq!(order.customer_name, "Integration Customer");
        assert_eq!(order.status.as_deref(), Some("pending"));

        let _ = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(&order_id)
            .execute(&pool)
            .await;
        let _ = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(&customer_id)
            .execute(&pool)
            .await;
    }

    #[tokio::test]
    async fn test_generate_weekly_orders_integration() {
        let pool = setup_test_db().await;

        let customer_id = create_customer_internal(
            &pool,
            CustomerInput {
                id: None,
                name: "Weekly Customer (Integration)".to_string(),
                quantity: None,
                unit: None,
                contact_number: None,
                area: None,
                address: None,
                geopin: None,
                delivery_agent: None,
            },
        )
        .await
        .expect("create_customer_internal failed");

        let weekly = WeeklyOrder {
            customer_id: customer_id.clone(),
            customer_name: String::new(),
            item: "Milk".to_string(),
            month: 2,
            year: 2024,
            monday: 2.0,
            tuesday: 0.0,
            wednesday: 1.0,
            thursday: 0.0,
            friday: 0.0,
            saturday: 0.0,
            sunday: 0.0,
        };

        let inserted = generate_weekly_orders_internal(&pool, weekly)
            .await
            .expect("generate_weekly_orders_internal failed");

        // Four Mondays and four Wednesdays in February 2024.
        assert_eq!(inserted, 8);

        let rows: Vec<Order> = sqlx::query_as(
            "SELECT * FROM orders WHERE customer_id = $1 ORDER BY order_date ASC",
        )
        .bind(&customer_id)
        .fetch_all(&pool)
        .await
        .expect("Failed to fetch generated orders");

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].order_date.to_string(), "2024-02-05");
        assert_eq!(rows[7].order_date.to_string(), "2024-02-28");
        assert!(rows.iter().all(|o| o.status.as_deref() == Some("pending")));
        assert!(rows
            .iter()
            .all(|o| o.customer_name == "Weekly Customer (Integration)"));

        let _ = sqlx::query("DELETE FROM orders WHERE customer_id = $1")
            .bind(&customer_id)
            .execute(&pool)
            .await;
        let _ = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(&customer_id)
            .execute(&pool)
            .await;
    }

    #[tokio::test]
    async fn test_generate_weekly_orders_rejects_all_zero() {
        let pool = setup_test_db().await;

        let customer_id = create_customer_internal(
            &pool,
            CustomerInput {
                id: None,
                name: "Zero Customer (Integration)".to_string(),
                quantity: None,
                unit: None,
                contact_number: None,
                area: None,
                address: None,
                geopin: None,
                delivery_agent: None,
            },
        )
        .await
        .expect("create_customer_internal failed");

        let weekly = WeeklyOrder {
            customer_id: customer_id.clone(),
            customer_name: String::new(),
            item: "Milk".to_string(),
            month: 2,
            year: 2024,
            monday: 0.0,
            tuesday: 0.0,
            wednesday: 0.0,
            thursday: 0.0,
            friday: 0.0,
            saturday: 0.0,
            sunday: 0.0,
        };

        let result = generate_weekly_orders_internal(&pool, weekly).await;
        assert!(result.is_err(), "all-zero recurrence must not silently succeed");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
            .bind(&customer_id)
            .fetch_one(&pool)
            .await
            .expect("Failed to count orders");
        assert_eq!(count.0, 0);

        let _ = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(&customer_id)
            .execute(&pool)
            .await;
    }

    #[tokio::test]
    async fn test_authorization_checks() {
        use crate::commands::agent::{create_agent_internal, DeliveryAgentInput};
        use crate::middleware::auth::{is_authorized_admin, is_authorized_delivery_agent};

        let pool = setup_test_db().await;

        // An email nobody granted anything to is authorized for nothing.
        let email = "nobody@example.com";
        assert!(!is_authorized_admin(&pool, email).await.unwrap());
        assert!(!is_authorized_delivery_agent(&pool, email).await.unwrap());

        // An inactive agent row does not authorize the delivery path.
        let agent_email = "inactive.agent@example.com";
        let agent_id = create_agent_internal(
            &pool,
            DeliveryAgentInput {
                id: None,
                email: agent_email.to_string(),
                name: "Inactive Agent (Integration)".to_string(),
                phone: None,
                area: None,
                is_active: false,
            },
        )
        .await
        .expect("create_agent_internal failed");

        assert!(!is_authorized_delivery_agent(&pool, agent_email)
            .await
            .unwrap());

        let _ = sqlx::query("UPDATE delivery_agents SET is_active = TRUE WHERE id = $1")
            .bind(&agent_id)
            .execute(&pool)
            .await;
        assert!(is_authorized_delivery_agent(&pool, agent_email)
            .await
            .unwrap());

        let _ = sqlx::query("DELETE FROM delivery_agents WHERE id = $1")
            .bind(&agent_id)
            .execute(&pool)
            .await;
    }

    #[tokio::test]
    async fn test_feed_record_round_trip() {
        let pool = setup_test_db().await;

        let cow_id = create_cow_internal(&pool, cow_input("Feed Cow (Integration)"))
            .await
            .expect("create_cow_internal failed");

        let draft = crate::commands::feed::FeedRecordDraft {
            cow_id: Some(cow_id.clone()),
            record_date: Some("2024-05-10".to_string()),
            makai: Some("3.27".to_string()),
            milk_output_morning: Some("2.34".to_string()),
            milk_output_evening: Some("1.06".to_string()),
            ..Default::default()
        };

        let record_id = crate::commands::feed::create_feed_record_internal(&pool, draft)
            .await
            .expect("create_feed_record_internal failed");

        let row: (Option<f64>, Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            "SELECT makai, milk_output_morning, milk_output_evening, milk_output
             FROM feed_records WHERE id = $1",
        )
        .bind(&record_id)
        .fetch_one(&pool)
        .await
        .expect("Failed to fetch feed record");

        assert_eq!(row.0, Some(3.3));
        assert_eq!(row.1, Some(2.3));
        assert_eq!(row.2, Some(1.1));
        assert_eq!(row.3, Some(3.4));

        let _ = sqlx::query("DELETE FROM feed_records WHERE id = $1")
            .bind(&record_id)
            .execute(&pool)
            .await;
        let _ = sqlx::query("DELETE FROM cows WHERE id = $1")
            .bind(&cow_id)
            .execute(&pool)
            .await;
    }
}
