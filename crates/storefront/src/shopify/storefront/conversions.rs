//! Wire-to-domain conversion functions.

use driftwood_core::{CartId, CartLineId, ProductId, VariantId};

use crate::shopify::types::{
    Cart, CartCost, CartLine, CartMerchandise, CartMerchandiseProduct, Image, PageInfo, PriceRange,
    Product, ProductConnection, ProductOption, ProductVariant, SelectedOption,
};

use super::wire;

pub fn convert_cart(cart: wire::WireCart) -> Cart {
    Cart {
        id: CartId::new(cart.id),
        total_quantity: cart.total_quantity,
        checkout_url: cart.checkout_url,
        cost: CartCost {
            subtotal_amount: cart.cost.subtotal_amount,
            total_amount: cart.cost.total_amount,
            total_tax_amount: cart.cost.total_tax_amount,
        },
        lines: cart.lines.nodes.into_iter().map(convert_cart_line).collect(),
    }
}

fn convert_cart_line(line: wire::WireCartLine) -> CartLine {
    CartLine {
        id: CartLineId::new(line.id),
        quantity: line.quantity,
        merchandise: convert_merchandise(line.merchandise),
    }
}

fn convert_merchandise(merchandise: wire::WireMerchandise) -> CartMerchandise {
    CartMerchandise {
        id: VariantId::new(merchandise.id),
        title: merchandise.title,
        price: merchandise.price,
        selected_options: merchandise
            .selected_options
            .into_iter()
            .map(convert_selected_option)
            .collect(),
        image: merchandise.image.map(convert_image),
        product: CartMerchandiseProduct {
            id: ProductId::new(merchandise.product.id),
            handle: merchandise.product.handle,
            title: merchandise.product.title,
            featured_image: merchandise
                .product
                .images
                .nodes
                .into_iter()
                .next()
                .map(convert_image),
        },
    }
}

pub fn convert_product(product: wire::WireProduct) -> Product {
    Product {
        id: ProductId::new(product.id),
        handle: product.handle,
        title: product.title,
        description: product.description,
        tags: product.tags,
        available_for_sale: product.available_for_sale,
        price_range: convert_price_range(product.price_range),
        compare_at_price_range: product.compare_at_price_range.map(convert_price_range),
        images: product.images.nodes.into_iter().map(convert_image).collect(),
        options: product
            .options
            .into_iter()
            .map(|o| ProductOption {
                id: o.id,
                name: o.name,
                values: o.values,
            })
            .collect(),
        variants: product
            .variants
            .nodes
            .into_iter()
            .map(convert_variant)
            .collect(),
    }
}

pub fn convert_product_connection(connection: wire::WireProductConnection) -> ProductConnection {
    ProductConnection {
        products: connection.nodes.into_iter().map(convert_product).collect(),
        page_info: PageInfo {
            has_next_page: connection.page_info.has_next_page,
            has_previous_page: connection.page_info.has_previous_page,
            start_cursor: connection.page_info.start_cursor,
            end_cursor: connection.page_info.end_cursor,
        },
    }
}

fn convert_variant(variant: wire::WireVariant) -> ProductVariant {
    ProductVariant {
        id: VariantId::new(variant.id),
        title: variant.title,
        available_for_sale: variant.available_for_sale,
        price: variant.price,
        compare_at_price: variant.compare_at_price,
        selected_options: variant
            .selected_options
            .into_iter()
            .map(convert_selected_option)
            .collect(),
    }
}

fn convert_price_range(range: wire::WirePriceRange) -> PriceRange {
    PriceRange {
        min_variant_price: range.min_variant_price,
        max_variant_price: range.max_variant_price,
    }
}

fn convert_selected_option(option: wire::WireSelectedOption) -> SelectedOption {
    SelectedOption {
        name: option.name,
        value: option.value,
    }
}

fn convert_image(image: wire::WireImage) -> Image {
    Image {
        id: image.id,
        url: image.url,
        alt_text: image.alt_text,
    }
}
