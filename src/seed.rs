use crate::error::Result;
use crate::AppState;

const USERS: [(&str, &str); 4] = [
    ("moe", "m_pw"),
    ("lucy", "l_pw"),
    ("ethyl", "e_pw"),
    ("curly", "c_pw"),
];

const PRODUCTS: [&str; 5] = ["foo", "bar", "bazz", "quq", "fip"];

/// Populates an empty database with demo users, products and one favorite.
/// Returns false without touching anything when users already exist.
pub async fn seed(state: &AppState) -> Result<bool> {
    if !state.users().list_all().await?.is_empty() {
        tracing::info!("Users already present, skipping seed");
        return Ok(false);
    }

    let mut users = Vec::with_capacity(USERS.len());
    for (username, password) in USERS {
        users.push(state.users().create_user(username, password).await?);
    }

    let mut products = Vec::with_capacity(PRODUCTS.len());
    for name in PRODUCTS {
        products.push(state.products().create(name).await?);
    }

    if let (Some(moe), Some(foo)) = (users.first(), products.first()) {
        state.favorites().create(moe.id, foo.id).await?;
    }

    tracing::info!(
        users = users.len(),
        products = products.len(),
        "Seeded users and products"
    );
    Ok(true)
}
