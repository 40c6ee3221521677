use quire::{money::format_price, orders::Order, products::Product, reviews::Review};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

fn render(builder: Builder, numeric: &[usize]) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());

    for &column in numeric {
        table.modify(Columns::one(column), Alignment::right());
    }

    table.modify(Rows::first(), Alignment::left());

    table.to_string()
}

pub(crate) fn products<'a>(products: impl IntoIterator<Item = &'a Product>) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Sub-category", "Price", "Rating", "Stock"]);

    for product in products {
        let price = match product.original_price {
            Some(original) if product.is_on_sale() => {
                format!("{} (was {})", format_price(product.price), format_price(original))
            }
            _ => format_price(product.price),
        };

        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.sub_category.name.clone(),
            price,
            format!("{:.1} ({})", product.ratings.average, product.ratings.count),
            product.stock.to_string(),
        ]);
    }

    render(builder, &[3, 5])
}

pub(crate) fn cart_lines(lines: &[(&Product, u32)], total: u64) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Unit price", "Qty", "Line total"]);

    for (product, quantity) in lines {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            format_price(product.price),
            quantity.to_string(),
            format_price(product.price * u64::from(*quantity)),
        ]);
    }

    builder.push_record([
        String::new(),
        "Total".to_string(),
        String::new(),
        String::new(),
        format_price(total),
    ]);

    render(builder, &[2, 3, 4])
}

pub(crate) fn orders(orders: &[Order]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Date", "Customer", "Items", "Total", "Status"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            order.date.strftime("%Y-%m-%d %H:%M").to_string(),
            order.customer_name.clone(),
            order.unit_count().to_string(),
            format_price(order.total),
            order.status.as_str().to_string(),
        ]);
    }

    render(builder, &[3, 4])
}

pub(crate) fn reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Author", "Stars", "Review"]);

    for review in reviews {
        builder.push_record([
            review.id.to_string(),
            review.product_id.to_string(),
            review.user_name.clone(),
            "★".repeat(usize::from(review.rating)),
            review.review_text.clone(),
        ]);
    }

    render(builder, &[])
}
