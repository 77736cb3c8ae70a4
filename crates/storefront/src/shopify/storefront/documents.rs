//! GraphQL documents for the Shopify Storefront API.
//!
//! Documents are hand-written strings; the response shapes they select are
//! mirrored by the structs in [`super::wire`]. Keep the two in sync when
//! editing a selection set.

/// Shared selection set for product fields.
macro_rules! product_document {
    ($ops:literal) => {
        concat!(
            $ops,
            "\nfragment productFields on Product {\n",
            "  id\n",
            "  title\n",
            "  handle\n",
            "  description\n",
            "  tags\n",
            "  availableForSale\n",
            "  priceRange {\n",
            "    minVariantPrice { amount currencyCode }\n",
            "    maxVariantPrice { amount currencyCode }\n",
            "  }\n",
            "  compareAtPriceRange {\n",
            "    minVariantPrice { amount currencyCode }\n",
            "    maxVariantPrice { amount currencyCode }\n",
            "  }\n",
            "  images(first: 10) {\n",
            "    nodes { id url altText }\n",
            "  }\n",
            "  variants(first: 100) {\n",
            "    nodes {\n",
            "      id\n",
            "      title\n",
            "      availableForSale\n",
            "      price { amount currencyCode }\n",
            "      compareAtPrice { amount currencyCode }\n",
            "      selectedOptions { name value }\n",
            "    }\n",
            "  }\n",
            "  options { id name values }\n",
            "}\n",
        )
    };
}

/// Shared selection set for cart fields.
///
/// Every cart query and mutation selects the same full cart representation:
/// the response is adopted wholesale as the new local snapshot, so a partial
/// selection would silently drop fields.
macro_rules! cart_document {
    ($ops:literal) => {
        concat!(
            $ops,
            "\nfragment cartFields on Cart {\n",
            "  id\n",
            "  totalQuantity\n",
            "  checkoutUrl\n",
            "  cost {\n",
            "    subtotalAmount { amount currencyCode }\n",
            "    totalAmount { amount currencyCode }\n",
            "    totalTaxAmount { amount currencyCode }\n",
            "  }\n",
            "  lines(first: 100) {\n",
            "    nodes {\n",
            "      id\n",
            "      quantity\n",
            "      merchandise {\n",
            "        ... on ProductVariant {\n",
            "          id\n",
            "          title\n",
            "          price { amount currencyCode }\n",
            "          selectedOptions { name value }\n",
            "          image { id url altText }\n",
            "          product {\n",
            "            id\n",
            "            title\n",
            "            handle\n",
            "            images(first: 1) { nodes { id url altText } }\n",
            "          }\n",
            "        }\n",
            "      }\n",
            "    }\n",
            "  }\n",
            "}\n",
        )
    };
}

pub const GET_PRODUCTS: &str = product_document!(
    "query getProducts($first: Int!, $after: String) {\n\
       products(first: $first, after: $after) {\n\
         pageInfo { hasNextPage hasPreviousPage startCursor endCursor }\n\
         nodes { ...productFields }\n\
       }\n\
     }"
);

pub const GET_PRODUCT_BY_HANDLE: &str = product_document!(
    "query getProduct($handle: String!) {\n\
       product(handle: $handle) { ...productFields }\n\
     }"
);

pub const GET_CART: &str = cart_document!(
    "query getCart($id: ID!) {\n\
       cart(id: $id) { ...cartFields }\n\
     }"
);

pub const CART_CREATE: &str = cart_document!(
    "mutation cartCreate($input: CartInput!) {\n\
       cartCreate(input: $input) {\n\
         cart { ...cartFields }\n\
         userErrors { field message }\n\
       }\n\
     }"
);

pub const CART_LINES_ADD: &str = cart_document!(
    "mutation cartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {\n\
       cartLinesAdd(cartId: $cartId, lines: $lines) {\n\
         cart { ...cartFields }\n\
         userErrors { field message }\n\
       }\n\
     }"
);

pub const CART_LINES_UPDATE: &str = cart_document!(
    "mutation cartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!) {\n\
       cartLinesUpdate(cartId: $cartId, lines: $lines) {\n\
         cart { ...cartFields }\n\
         userErrors { field message }\n\
       }\n\
     }"
);

pub const CART_LINES_REMOVE: &str = cart_document!(
    "mutation cartLinesRemove($cartId: ID!, $lineIds: [ID!]!) {\n\
       cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {\n\
         cart { ...cartFields }\n\
         userErrors { field message }\n\
       }\n\
     }"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_reference_their_fragment() {
        for doc in [GET_CART, CART_CREATE, CART_LINES_ADD, CART_LINES_UPDATE, CART_LINES_REMOVE] {
            assert!(doc.contains("...cartFields"));
            assert!(doc.contains("fragment cartFields on Cart"));
        }
        for doc in [GET_PRODUCTS, GET_PRODUCT_BY_HANDLE] {
            assert!(doc.contains("...productFields"));
            assert!(doc.contains("fragment productFields on Product"));
        }
    }

    #[test]
    fn test_mutations_select_user_errors() {
        for doc in [CART_CREATE, CART_LINES_ADD, CART_LINES_UPDATE, CART_LINES_REMOVE] {
            assert!(doc.contains("userErrors { field message }"));
        }
    }
}
