// Domain models shared by the handlers.

pub struct Order {
    /// oas:"OrderResponse*;OrderRequest" json:"orderId"
    pub id: u64,
    /// oas:"OrderResponse*;OrderRequest*" oas_desc:"number of items"
    pub quantity: i32,
    /// oas:"OrderResponse" oas_ex:"12.5"
    pub total: Option<f64>,
    /// oas:"OrderResponse" oas_ref:"Customer"
    pub customer: Customer,
}

pub struct Customer {
    /// oas:"Customer*"
    pub email: String,
}
