//! Site Content
//!
//! Editable homepage layout and deals page settings. Homepage sections are a
//! closed set of kinds, tagged by `type` on the wire.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::{Category, CategoryId, Product, ProductId};

/// Products shown in a homepage carousel.
pub const CAROUSEL_LIMIT: usize = 8;

/// Storefront pages a banner can link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    /// Landing page
    Home,

    /// Product browser
    Products,

    /// Single product
    ProductDetail,

    /// Discounted products
    Deals,

    /// Cart
    Cart,

    /// Checkout form
    Checkout,

    /// Post-checkout confirmation
    OrderConfirmation,

    /// Back office
    Admin,

    /// Customer order history
    OrdersHistory,

    /// Wishlist
    Wishlist,

    /// Sign in / sign up
    Auth,

    /// Privacy policy
    Privacy,

    /// About us
    About,

    /// Terms and conditions
    Terms,
}

impl Page {
    const ALL: [Self; 14] = [
        Self::Home,
        Self::Products,
        Self::ProductDetail,
        Self::Deals,
        Self::Cart,
        Self::Checkout,
        Self::OrderConfirmation,
        Self::Admin,
        Self::OrdersHistory,
        Self::Wishlist,
        Self::Auth,
        Self::Privacy,
        Self::About,
        Self::Terms,
    ];

    /// Slug used in banner links.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Products => "products",
            Self::ProductDetail => "productDetail",
            Self::Deals => "deals",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::OrderConfirmation => "orderConfirmation",
            Self::Admin => "admin",
            Self::OrdersHistory => "ordersHistory",
            Self::Wishlist => "wishlist",
            Self::Auth => "auth",
            Self::Privacy => "privacy",
            Self::About => "about",
            Self::Terms => "terms",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised page slug.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown page `{0}`")]
pub struct UnknownPage(String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// What a banner's `link` refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkType {
    /// A storefront page slug
    #[default]
    Page,

    /// A main category id
    Category,
}

/// Banner text placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BannerLayout {
    /// Text on the left
    TextLeft,

    /// Centred text
    #[default]
    TextCenter,

    /// Text on the right
    TextRight,
}

/// Resolved banner destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerTarget {
    /// Navigate to a page
    Page(Page),

    /// Open the product browser on a category
    Category(CategoryId),
}

/// A banner with a call to action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerContent {
    /// Shown on the homepage
    pub enabled: bool,

    /// Background image URL
    pub image: String,

    /// Headline
    pub title: String,

    /// Sub-headline
    pub subtitle: String,

    /// Button label
    pub button_text: String,

    /// Page slug or category id, depending on `link_type`
    pub link: String,

    /// Interpretation of `link`
    pub link_type: LinkType,

    /// Text placement
    #[serde(default)]
    pub layout: BannerLayout,
}

impl BannerContent {
    /// Where the call to action leads, if the link is well-formed.
    pub fn target(&self) -> Option<BannerTarget> {
        match self.link_type {
            LinkType::Page => self.link.parse().ok().map(BannerTarget::Page),
            LinkType::Category if self.link.is_empty() => None,
            LinkType::Category => Some(BannerTarget::Category(self.link.as_str().into())),
        }
    }
}

/// Product selection for a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CarouselFilter {
    /// Bestsellers
    Bestseller,

    /// New arrivals
    New,

    /// Discounted products
    Sale,
}

impl CarouselFilter {
    /// Whether `product` belongs in the carousel.
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::Bestseller => product.is_bestseller,
            Self::New => product.is_new,
            Self::Sale => product.is_on_sale(),
        }
    }
}

/// Carousel card layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CarouselLayout {
    /// Regular product cards
    #[default]
    Default,

    /// Stacked cards
    StackedCard,
}

/// Promo banner width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromoBannerType {
    /// Full width
    #[default]
    Full,

    /// Half width, paired with the next promo
    Split,
}

/// Section payload, one variant per section kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SectionKind {
    /// Rotating banners
    Hero {
        /// Banners in display order
        banners: Vec<BannerContent>,
    },

    /// Grid of category tiles
    CategoryGrid {
        /// Heading
        title: String,

        /// Categories to show
        category_ids: Vec<CategoryId>,
    },

    /// Horizontal product strip
    ProductCarousel {
        /// Heading
        title: String,

        /// Product selection
        filter: CarouselFilter,

        /// Card layout
        #[serde(default)]
        layout: CarouselLayout,

        /// "View all" destination
        link_to_page: Page,
    },

    /// Single promotional banner
    PromoBanner {
        /// Width
        #[serde(default)]
        banner_type: PromoBannerType,

        /// Banner
        content: BannerContent,
    },
}

/// A homepage section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomePageSection {
    /// Stable section id
    pub id: String,

    /// Shown on the homepage
    pub enabled: bool,

    /// Kind-specific payload
    #[serde(flatten)]
    pub kind: SectionKind,
}

/// A section resolved against the catalog, ready to display.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionView<'a> {
    /// Enabled hero banners
    Hero(Vec<&'a BannerContent>),

    /// Category tiles
    CategoryGrid {
        /// Heading
        title: &'a str,

        /// Categories, in catalog order
        categories: Vec<&'a Category>,
    },

    /// Product strip
    ProductCarousel {
        /// Heading
        title: &'a str,

        /// Products, at most [`CAROUSEL_LIMIT`]
        products: Vec<&'a Product>,

        /// "View all" destination
        link: Page,
    },

    /// Promotional banner
    PromoBanner(&'a BannerContent),
}

impl HomePageSection {
    /// Resolve the section, or `None` when it is hidden or would be empty.
    pub fn view<'a>(
        &'a self,
        products: &'a [Product],
        categories: &'a [Category],
    ) -> Option<SectionView<'a>> {
        if !self.enabled {
            return None;
        }

        let view = match &self.kind {
            SectionKind::Hero { banners } => {
                let banners: Vec<_> = banners.iter().filter(|banner| banner.enabled).collect();

                if banners.is_empty() {
                    return None;
                }

                SectionView::Hero(banners)
            }
            SectionKind::CategoryGrid {
                title,
                category_ids,
            } => SectionView::CategoryGrid {
                title,
                categories: categories
                    .iter()
                    .filter(|category| category_ids.contains(&category.id))
                    .collect(),
            },
            SectionKind::ProductCarousel {
                title,
                filter,
                link_to_page,
                ..
            } => {
                let products = carousel_products(products, *filter);

                if products.is_empty() {
                    return None;
                }

                SectionView::ProductCarousel {
                    title,
                    products,
                    link: *link_to_page,
                }
            }
            SectionKind::PromoBanner { content, .. } => {
                if !content.enabled {
                    return None;
                }

                SectionView::PromoBanner(content)
            }
        };

        Some(view)
    }
}

/// Homepage layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomePage {
    /// Sections in display order
    pub sections: Vec<HomePageSection>,
}

impl HomePage {
    /// Every visible section, resolved, in display order.
    pub fn visible_sections<'a>(
        &'a self,
        products: &'a [Product],
        categories: &'a [Category],
    ) -> Vec<SectionView<'a>> {
        self.sections
            .iter()
            .filter_map(|section| section.view(products, categories))
            .collect()
    }
}

/// Deals page settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealsPage {
    /// Product pinned as the headline deal
    #[serde(default)]
    pub best_deal_product_id: Option<ProductId>,
}

/// Editable storefront content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    /// Homepage layout
    pub homepage: HomePage,

    /// Deals page settings
    #[serde(default)]
    pub deals_page: DealsPage,
}

impl Default for SiteContent {
    fn default() -> Self {
        let banner = |title: &str, subtitle: &str, button: &str, link: Page| BannerContent {
            enabled: true,
            image: format!("https://picsum.photos/seed/{link}/1600/600"),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            button_text: button.to_string(),
            link: link.as_str().to_string(),
            link_type: LinkType::Page,
            layout: BannerLayout::TextCenter,
        };

        let carousel = |id: &str, title: &str, filter: CarouselFilter, link: Page| HomePageSection {
            id: id.to_string(),
            enabled: true,
            kind: SectionKind::ProductCarousel {
                title: title.to_string(),
                filter,
                layout: CarouselLayout::Default,
                link_to_page: link,
            },
        };

        Self {
            homepage: HomePage {
                sections: vec![
                    HomePageSection {
                        id: "hero".to_string(),
                        enabled: true,
                        kind: SectionKind::Hero {
                            banners: vec![banner(
                                "Everything for your desk",
                                "Notebooks, pens and art supplies",
                                "Shop now",
                                Page::Products,
                            )],
                        },
                    },
                    carousel("bestsellers", "Bestsellers", CarouselFilter::Bestseller, Page::Products),
                    carousel("new-arrivals", "New arrivals", CarouselFilter::New, Page::Products),
                    HomePageSection {
                        id: "deals-promo".to_string(),
                        enabled: true,
                        kind: SectionKind::PromoBanner {
                            banner_type: PromoBannerType::Full,
                            content: banner(
                                "Deals of the week",
                                "Up to half off selected items",
                                "See deals",
                                Page::Deals,
                            ),
                        },
                    },
                    carousel("on-sale", "On sale", CarouselFilter::Sale, Page::Deals),
                ],
            },
            deals_page: DealsPage::default(),
        }
    }
}

/// The first [`CAROUSEL_LIMIT`] products passing `filter`, in catalog order.
pub fn carousel_products(products: &[Product], filter: CarouselFilter) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| filter.matches(product))
        .take(CAROUSEL_LIMIT)
        .collect()
}

/// Products on sale, in catalog order.
pub fn deal_products(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|product| product.is_on_sale()).collect()
}

/// The headline deal: the pinned product when it is on sale, otherwise the
/// product with the largest discount fraction. The earliest product wins
/// ties.
pub fn best_deal<'a>(products: &'a [Product], pinned: Option<&ProductId>) -> Option<&'a Product> {
    let pinned = pinned.and_then(|id| {
        products
            .iter()
            .find(|product| product.id == *id && product.is_on_sale())
    });

    pinned.or_else(|| {
        products
            .iter()
            .filter_map(|product| product.discount_fraction().map(|fraction| (product, fraction)))
            .fold(None, |best: Option<(&Product, f64)>, (product, fraction)| match best {
                Some((_, best_fraction)) if fraction <= best_fraction => best,
                _ => Some((product, fraction)),
            })
            .map(|(product, _)| product)
    })
}
