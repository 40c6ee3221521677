//! Quire prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartItem, CartLedger},
    catalog::{
        CatalogIndex, Filter, FilterConfig, ListingPage, PAGE_SIZE, PriceRange, ProductListing,
        SearchField, SearchHit, SortKey,
    },
    chat::{ChatConversation, ChatError, ChatMessage, MessageStatus, NewChatMessage, Sender},
    content::{BannerTarget, CarouselFilter, HomePageSection, SectionKind, SectionView, SiteContent},
    dashboard::Dashboard,
    ids::{Identity, TypedId, UserId},
    money::format_price,
    orders::{CustomerDetails, NewOrder, Order, OrderError, OrderId, OrderStatus, PaymentMethod},
    outcome::Outcome,
    products::{Category, CategoryId, Product, ProductId, SubCategory, SubCategoryId},
    reviews::{NewReview, Review, ReviewError, ReviewId},
    toasts::ToastRelay,
    wishlist::WishlistSet,
};
