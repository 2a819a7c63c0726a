//! Built-in check catalogue
//!
//! Category weights in the general variant sum to 100. The brand variant
//! adds a Brand Presence category and an extra content check on top.

use crate::models::{Category, Check, Importance};
use Importance::{Critical, High, Low, Medium};

fn check(
    id: &str,
    name: &str,
    importance: Importance,
    description: &str,
    link: Option<&str>,
) -> Check {
    Check {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        importance,
        link: link.map(str::to_string),
    }
}

fn category(id: &str, name: &str, weight: f64, description: &str, checks: Vec<Check>) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        weight,
        checks,
    }
}

fn technical() -> Category {
    category(
        "technical",
        "Technical SEO",
        25.0,
        "Crawlability, indexability and site infrastructure",
        vec![
            check(
                "https",
                "Site is served over HTTPS",
                Critical,
                "Every page loads over HTTPS and HTTP requests redirect to it.",
                Some("https://developers.google.com/search/docs/crawling-indexing/http-network-errors"),
            ),
            check(
                "indexable",
                "Key pages are indexable",
                Critical,
                "Important pages carry no stray noindex directive and are not blocked in robots.txt.",
                Some("https://developers.google.com/search/docs/crawling-indexing/block-indexing"),
            ),
            check(
                "robots-txt",
                "robots.txt is present and correct",
                High,
                "robots.txt exists at the site root and does not block important sections.",
                Some("https://developers.google.com/search/docs/crawling-indexing/robots/intro"),
            ),
            check(
                "xml-sitemap",
                "XML sitemap is submitted",
                High,
                "An XML sitemap lists canonical URLs and is referenced in robots.txt or Search Console.",
                Some("https://developers.google.com/search/docs/crawling-indexing/sitemaps/overview"),
            ),
            check(
                "canonical-tags",
                "Canonical tags are set",
                High,
                "Each page declares a self-referencing or consolidating rel=canonical URL.",
                Some("https://developers.google.com/search/docs/crawling-indexing/consolidate-duplicate-urls"),
            ),
            check(
                "crawl-errors",
                "No crawl errors on key pages",
                High,
                "Search Console reports no 4xx/5xx errors for pages that should rank.",
                None,
            ),
            check(
                "redirect-chains",
                "No redirect chains or loops",
                Medium,
                "Internal links point at final URLs; redirects resolve in a single hop.",
                None,
            ),
            check(
                "clean-urls",
                "URLs are short and descriptive",
                Low,
                "URLs use readable words, hyphens and no session parameters.",
                Some("https://developers.google.com/search/docs/crawling-indexing/url-structure"),
            ),
            check(
                "hreflang",
                "hreflang annotations for localized pages",
                Low,
                "Localized variants reference each other with hreflang, including x-default.",
                Some("https://developers.google.com/search/docs/specialty/international/localized-versions"),
            ),
        ],
    )
}

fn on_page() -> Category {
    category(
        "on-page",
        "On-Page SEO",
        20.0,
        "Titles, descriptions, headings and internal linking",
        vec![
            check(
                "title-tag",
                "Unique, descriptive title tags",
                Critical,
                "Every page has a unique <title> of roughly 30-60 characters containing the primary topic.",
                Some("https://developers.google.com/search/docs/appearance/title-link"),
            ),
            check(
                "meta-description",
                "Compelling meta descriptions",
                High,
                "Every page has a unique meta description of roughly 70-160 characters.",
                Some("https://developers.google.com/search/docs/appearance/snippet"),
            ),
            check(
                "h1-heading",
                "One H1 per page",
                High,
                "Each page has exactly one H1 that describes its main topic.",
                None,
            ),
            check(
                "heading-hierarchy",
                "Logical heading hierarchy",
                Medium,
                "H2-H6 headings nest in order and outline the content.",
                None,
            ),
            check(
                "image-alt-text",
                "Images have alt text",
                Medium,
                "Meaningful images carry descriptive alt attributes.",
                Some("https://developers.google.com/search/docs/appearance/google-images"),
            ),
            check(
                "internal-linking",
                "Strong internal linking",
                Medium,
                "Important pages receive contextual internal links with descriptive anchor text.",
                Some("https://developers.google.com/search/docs/crawling-indexing/links-crawlable"),
            ),
            check(
                "keyword-in-url",
                "Primary keyword in URL",
                Low,
                "The page slug reflects the target query.",
                None,
            ),
        ],
    )
}

fn content() -> Category {
    category(
        "content",
        "Content Quality",
        20.0,
        "Usefulness, originality and trust signals",
        vec![
            check(
                "unique-content",
                "Original, non-duplicated content",
                Critical,
                "Pages offer original content and are not substantially duplicated elsewhere.",
                Some("https://developers.google.com/search/docs/fundamentals/creating-helpful-content"),
            ),
            check(
                "search-intent",
                "Content matches search intent",
                High,
                "Each target page answers the intent behind its primary queries.",
                None,
            ),
            check(
                "eeat-signals",
                "Experience and expertise are evident",
                High,
                "Authors, sources and credentials are visible where they matter.",
                Some("https://developers.google.com/search/docs/fundamentals/creating-helpful-content"),
            ),
            check(
                "thin-content",
                "No thin pages",
                Medium,
                "Low-value or near-empty pages are improved, merged or noindexed.",
                None,
            ),
            check(
                "content-freshness",
                "Content is kept up to date",
                Medium,
                "Time-sensitive pages show and honour a last-updated date.",
                None,
            ),
            check(
                "readability",
                "Readable formatting",
                Low,
                "Short paragraphs, lists and descriptive subheadings aid scanning.",
                None,
            ),
        ],
    )
}

fn performance() -> Category {
    category(
        "performance",
        "Page Speed & Core Web Vitals",
        15.0,
        "Loading, interactivity and visual stability",
        vec![
            check(
                "lcp",
                "Largest Contentful Paint under 2.5s",
                High,
                "The main content renders within 2.5 seconds at the 75th percentile.",
                Some("https://web.dev/articles/lcp"),
            ),
            check(
                "inp",
                "Interaction to Next Paint under 200ms",
                High,
                "Pages respond to input within 200 milliseconds at the 75th percentile.",
                Some("https://web.dev/articles/inp"),
            ),
            check(
                "cls",
                "Cumulative Layout Shift under 0.1",
                High,
                "Content does not jump while loading.",
                Some("https://web.dev/articles/cls"),
            ),
            check(
                "image-optimization",
                "Images are compressed and sized",
                Medium,
                "Images use modern formats, explicit dimensions and lazy loading below the fold.",
                None,
            ),
            check(
                "render-blocking",
                "Minimal render-blocking resources",
                Medium,
                "Critical CSS is inlined and non-critical scripts are deferred.",
                None,
            ),
            check(
                "caching",
                "Static assets are cached",
                Low,
                "Static assets are served with long-lived cache headers.",
                None,
            ),
        ],
    )
}

fn mobile() -> Category {
    category(
        "mobile",
        "Mobile Friendliness",
        10.0,
        "Rendering and usability on small screens",
        vec![
            check(
                "viewport-meta",
                "Viewport meta tag is set",
                Critical,
                "Pages declare <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">.",
                None,
            ),
            check(
                "responsive-layout",
                "Layout adapts to small screens",
                High,
                "No horizontal scrolling; content reflows at common breakpoints.",
                None,
            ),
            check(
                "tap-targets",
                "Tap targets are large enough",
                Medium,
                "Buttons and links are at least 48px and spaced apart.",
                None,
            ),
            check(
                "mobile-font-size",
                "Legible font sizes",
                Low,
                "Body text is at least 16px on mobile.",
                None,
            ),
        ],
    )
}

fn structured_data() -> Category {
    category(
        "structured-data",
        "Structured Data",
        5.0,
        "Schema.org markup and rich result eligibility",
        vec![
            check(
                "schema-valid",
                "Structured data validates",
                High,
                "Markup passes the Rich Results Test without errors.",
                Some("https://search.google.com/test/rich-results"),
            ),
            check(
                "schema-organization",
                "Organization or LocalBusiness markup",
                Medium,
                "The home page describes the entity with Organization or LocalBusiness schema.",
                Some("https://developers.google.com/search/docs/appearance/structured-data/organization"),
            ),
            check(
                "rich-results",
                "Eligible pages use rich result types",
                Low,
                "Articles, products, FAQs and breadcrumbs carry the matching schema types.",
                Some("https://developers.google.com/search/docs/appearance/structured-data/search-gallery"),
            ),
        ],
    )
}

fn social() -> Category {
    category(
        "social",
        "Social & Off-Page",
        5.0,
        "Sharing metadata, social profiles and backlinks",
        vec![
            check(
                "backlink-profile",
                "Healthy backlink profile",
                High,
                "Referring domains are relevant; no manual actions or spammy link patterns.",
                None,
            ),
            check(
                "open-graph",
                "Open Graph tags",
                Medium,
                "Pages set og:title, og:description and og:image for link previews.",
                Some("https://ogp.me/"),
            ),
            check(
                "twitter-card",
                "Twitter card tags",
                Low,
                "Pages set twitter:card so shares render a preview.",
                None,
            ),
            check(
                "social-profiles",
                "Social profiles are linked",
                Low,
                "The site links to its official social profiles.",
                None,
            ),
        ],
    )
}

fn brand_presence() -> Category {
    category(
        "brand",
        "Brand Presence",
        15.0,
        "How the brand shows up in search and across the web",
        vec![
            check(
                "brand-serp",
                "Brand name ranks first",
                High,
                "Searching the brand name returns the official site in position one.",
                None,
            ),
            check(
                "google-business-profile",
                "Google Business Profile is claimed",
                High,
                "The profile is verified with accurate hours, categories and photos.",
                Some("https://support.google.com/business/answer/3038177"),
            ),
            check(
                "knowledge-panel",
                "Knowledge panel is present",
                Medium,
                "A knowledge panel appears for the brand and its facts are correct.",
                None,
            ),
            check(
                "brand-consistency",
                "Consistent name, address and phone",
                Medium,
                "Brand name and contact details match across site, profiles and directories.",
                None,
            ),
            check(
                "brand-sameas",
                "sameAs links in Organization schema",
                Medium,
                "Organization markup lists official profiles via sameAs.",
                Some("https://developers.google.com/search/docs/appearance/structured-data/organization"),
            ),
            check(
                "reviews",
                "Reviews are monitored and answered",
                Medium,
                "Recent reviews on major platforms receive responses.",
                None,
            ),
        ],
    )
}

pub(super) fn general() -> Vec<Category> {
    vec![
        technical(),
        on_page(),
        content(),
        performance(),
        mobile(),
        structured_data(),
        social(),
    ]
}

pub(super) fn brand() -> Vec<Category> {
    let mut categories = general();
    if let Some(content) = categories.iter_mut().find(|c| c.id == "content") {
        content.checks.push(check(
            "about-page",
            "About page tells the brand story",
            High,
            "An About page explains who is behind the brand, with team and contact details.",
            None,
        ));
    }
    categories.push(brand_presence());
    categories
}
