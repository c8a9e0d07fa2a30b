use pagehaus::prelude::*;

#[derive(Debug, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 Pagehaus Demo\n");

    // Statement planning needs no database
    let filter = Predicate::new()
        .eq("status", "active")
        .in_values("role", json!(["admin", "editor"]))
        .or_group(|p| p.gt("karma", 1000).is_not_null("verified_at"));
    let ordering = Ordering::new().descending("created_at").append("id");

    let request = PaginationRequest::new("users")
        .filter(filter)
        .ordering(&ordering)
        .page(2)
        .page_size(20);

    for dialect in Dialect::ALL {
        let plan = PaginationStrategy::new(dialect).paginate(&request)?;
        println!("📐 {}", dialect);
        println!("   count: {}", plan.count_statement);
        println!("   page:  {}", plan.page_statement);
    }
    println!();

    let complex = PaginationRequest::new(
        "SELECT dept, COUNT(*) AS staff FROM employees WHERE hired_at > ? GROUP BY dept ORDER BY staff DESC",
    )
    .parameters(vec![json!("2020-01-01")])
    .filter(Filter::fields([("region", json!("eu"))]));
    let plan = PaginationStrategy::new(Dialect::Postgres).paginate(&complex)?;
    println!("📊 Grouped statement on postgres");
    println!("   count: {}", plan.count_statement);
    println!("   page:  {}", plan.page_statement);
    println!("   parameters: {:?}\n", plan.parameters);

    // Running statements needs PAGEHAUS_CONFIG or ./pagehaus.toml with a [database] section
    let config = match AppConfig::load() {
        Ok(config) if config.database.is_some() => config,
        _ => {
            println!("ℹ️  No database configured, skipping execution");
            return Ok(());
        }
    };

    let pagehaus = Pagehaus::connect(&config).await?;
    pagehaus.health_check().await?;
    println!("✅ Database connected");

    let request = PaginationRequest::new("users")
        .filter(pagehaus.predicate().like("email", "%@example.com"))
        .ordering(&pagehaus.ordering().ascending("id"))
        .page_size(5);

    let page = pagehaus.fetch_page::<User>(&request).await?;
    println!(
        "📄 Page {}/{} ({} users total)",
        page.page, page.total_pages, page.total_elements
    );
    for user in &page.content {
        println!("   {} {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}
