// Sample service with annotation comments.
use std::collections::HashMap;

/* openapi-doc
@@openapi: 3.0.3
@@info.title: Address Book
@@info.description: Stores postal addresses
@@info.version: 2.1.0
@@info.contact.name: API Support
@@info.contact.email: support@example.com
@@info.license.name: MIT
@@
@@server: production
@@url: https://api.example.com/v2
@@description: production
@@url: https://staging.example.com/v2
@@description: staging
@@
@@securityScheme: bearerAuth
@@type: http
@@scheme: bearer
@@bearerFormat: JWT
@@
@@security: default
@@name: bearerAuth
@@
*/

/* openapi-doc
@@schema: Error
@@type: object
@@desc: Error envelope
@@prop_name: code
@@prop_type: integer
@@prop_req: true
@@prop_ex: 404
@@prop_name: message
@@prop_type: string
@@
@@schema: AddressList
@@type: array
@@prop_ref: AddressResponse
@@
*/

/* openapi-doc @@response: NotFound @@desc: address not found @@content_name: application/json @@content_ref: Error */

/* openapi-doc @@requestBody: NewAddress @@desc: address to store @@required: true @@content_name: application/json @@content_ref: AddressRequest */

/* openapi-doc
@@parameter: addressId
@@name: id
@@in: path
@@description: address identifier
@@required: true
@@schema_type: integer
@@
@@parameter: limit
@@name: limit
@@in: query
@@schema_type: integer
@@
*/

/* openapi-doc
@@struct: Address
*/
pub struct Address {
    /// oas:"AddressResponse*" json:"id"
    pub id: u64,
    /// Street line shown on labels.
    /// oas:"AddressRequest*;AddressResponse*" oas_desc:"street and number" oas_ex:"1 Main St, Apt 2"
    pub street: String,
    /// oas:"AddressRequest;AddressResponse" oas_ex:"84101" json:"zip,omitempty"
    pub zip_code: Option<u32>,
    /// oas:"AddressResponse" oas_ref:"Owner"
    pub owner: Owner,
    /// oas:"AddressResponse" json:"-"
    pub internal_note: String,
    pub created_by: String,
}

pub struct Owner {
    pub name: String,
}

/* openapi-doc
@@path: /addresses
@@summary: Address collection
@@
@@operation: /addresses
@@method: get
@@summary: List addresses
@@operation_id: listAddresses
@@tags: addresses
@@parameters.ref: limit
@@resp_name: 200
@@resp_desc: all addresses
@@
@@operation: /addresses
@@method: post
@@summary: Create address
@@tags: addresses
@@req_ref: NewAddress
@@resp_name: 201
@@resp_desc: created
@@
*/
pub fn addresses() -> HashMap<u64, Address> {
    HashMap::new()
}

/* openapi-doc
@@path: /addresses/{id}
@@parameters.ref: addressId
@@
@@operation: /addresses/{id}
@@method: get
@@summary: Fetch one address
@@resp_name: 200
@@resp_desc: the address
@@resp_name: 404
@@resp_ref: NotFound
@@
@@operation: /orphans
@@method: delete
@@
*/
pub fn address(id: u64) -> Option<Address> {
    let _ = id;
    None
}
