use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CartItemId(pub u64);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for CartItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuantityAction {
    #[serde(rename = "mas")]
    Increase,
    #[serde(rename = "menos")]
    Decrease,
}

impl QuantityAction {
    /// Path segment used by `/carrito/cambiar/<id>/<action>/`.
    pub fn as_path_segment(self) -> &'static str {
        match self {
            QuantityAction::Increase => "mas",
            QuantityAction::Decrease => "menos",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: CartItemId,
    pub producto: String,
    pub precio: f64,
    pub cantidad: u32,
    pub subtotal: f64,
    #[serde(default)]
    pub imagen: Option<String>,
}

/// Body of `GET /carrito/modal/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total: f64,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Body of `GET /carrito/cambiar/...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OkResponse {
    #[serde(default)]
    pub ok: bool,
}

/// Body of `POST /favorito/toggle/<product_id>/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WishlistToggleResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub added: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_summary_accepts_server_shape() {
        let body = r#"{
            "items": [
                {"id": 7, "producto": "Vestido Marrón", "precio": 120000.0,
                 "cantidad": 2, "subtotal": 240000.0}
            ],
            "total": 240000.0
        }"#;
        let summary: CartSummary = serde_json::from_str(body).unwrap();
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].id, CartItemId(7));
        assert_eq!(summary.items[0].imagen, None);
        assert_eq!(summary.total, 240000.0);
    }

    #[test]
    fn empty_cart_defaults() {
        let summary: CartSummary = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn quantity_action_wire_names() {
        assert_eq!(QuantityAction::Increase.as_path_segment(), "mas");
        assert_eq!(
            serde_json::to_string(&QuantityAction::Decrease).unwrap(),
            "\"menos\""
        );
    }

    #[test]
    fn wishlist_toggle_response() {
        let resp: WishlistToggleResponse =
            serde_json::from_str(r#"{"ok": true, "added": false}"#).unwrap();
        assert!(resp.ok);
        assert!(!resp.added);
    }
}
