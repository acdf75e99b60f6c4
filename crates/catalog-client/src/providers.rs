//! Streaming provider allow-list and deep links.

use crate::types::{RegionProviders, WatchProvider};

/// Streaming services shown to the user
pub const ALLOWED_PROVIDERS: &[&str] = &[
    "Netflix",
    "Amazon Prime Video",
    "Amazon Prime Video with Ads",
    "Prime Video",
    "Claro video",
    "Disney Plus",
    "Disney+",
    "ViX",
    "Max",
    "HBO Max",
    "ViX gratis",
    "Mercado Play",
    "Paramount Plus",
    "Paramount+",
    "Pluto TV",
];

/// A provider is allowed when its name and an allow-list entry contain one
/// another, ignoring case. Empty names are never allowed.
pub fn is_provider_allowed(provider_name: &str) -> bool {
    let name = provider_name.trim().to_lowercase();
    if name.is_empty() {
        return false;
    }
    ALLOWED_PROVIDERS.iter().any(|allowed| {
        let allowed = allowed.to_lowercase();
        name.contains(&allowed) || allowed.contains(&name)
    })
}

/// Search link for `title` on the provider's site, or a web search when
/// the provider has no known search page.
pub fn provider_url(provider_name: &str, title: &str) -> String {
    let query = urlencoding::encode(title);
    match provider_name.trim().to_lowercase().as_str() {
        "netflix" => format!("https://www.netflix.com/search?q={}", query),
        "amazon prime video" | "amazon prime video with ads" | "prime video" => format!(
            "https://www.primevideo.com/search/ref=atv_nb_sr?phrase={}",
            query
        ),
        "disney plus" | "disney+" => format!("https://www.disneyplus.com/search?q={}", query),
        "max" | "hbo max" => format!("https://www.max.com/search?q={}", query),
        "paramount plus" | "paramount+" => {
            format!("https://www.paramountplus.com/search/?query={}", query)
        }
        "claro video" => format!("https://www.clarovideo.com/mexico/buscar?q={}", query),
        "vix" | "vix gratis" => format!("https://www.vix.com/es-mx/search?q={}", query),
        "mercado play" => format!("https://play.mercadolibre.com.mx/search?q={}", query),
        "pluto tv" => format!("https://pluto.tv/es/search?term={}", query),
        _ => format!(
            "https://www.google.com/search?q={}+{}+streaming",
            query,
            urlencoding::encode(provider_name.trim())
        ),
    }
}

/// Keep only allowed providers in each offer category
pub fn allowed_only(region: &RegionProviders) -> RegionProviders {
    let keep = |providers: &[WatchProvider]| -> Vec<WatchProvider> {
        providers
            .iter()
            .filter(|p| is_provider_allowed(&p.provider_name))
            .cloned()
            .collect()
    };

    RegionProviders {
        link: region.link.clone(),
        flatrate: keep(&region.flatrate),
        rent: keep(&region.rent),
        buy: keep(&region.buy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(id: u32, name: &str) -> WatchProvider {
        WatchProvider {
            provider_id: id,
            provider_name: name.to_string(),
            logo_path: None,
        }
    }

    #[test]
    fn test_allowed_providers() {
        assert!(is_provider_allowed("Netflix"));
        assert!(is_provider_allowed("netflix basic with Ads"));
        assert!(is_provider_allowed("Disney+"));
        assert!(is_provider_allowed("HBO"));
        assert!(!is_provider_allowed("Crunchyroll"));
        assert!(!is_provider_allowed(""));
        assert!(!is_provider_allowed("   "));
    }

    #[test]
    fn test_provider_url_known_services() {
        assert_eq!(
            provider_url("Netflix", "The Matrix"),
            "https://www.netflix.com/search?q=The%20Matrix"
        );
        assert_eq!(
            provider_url("Prime Video", "Heat"),
            "https://www.primevideo.com/search/ref=atv_nb_sr?phrase=Heat"
        );
        assert_eq!(
            provider_url("ViX ", "Amores perros"),
            "https://www.vix.com/es-mx/search?q=Amores%20perros"
        );
    }

    #[test]
    fn test_provider_url_fallback() {
        assert_eq!(
            provider_url("Mubi", "Amélie"),
            "https://www.google.com/search?q=Am%C3%A9lie+Mubi+streaming"
        );
    }

    #[test]
    fn test_allowed_only() {
        let region = RegionProviders {
            link: Some("https://example.test".to_string()),
            flatrate: vec![provider(8, "Netflix"), provider(283, "Crunchyroll")],
            rent: vec![provider(2, "Apple TV")],
            buy: vec![provider(9, "Amazon Prime Video")],
        };

        let allowed = allowed_only(&region);
        assert_eq!(allowed.flatrate, vec![provider(8, "Netflix")]);
        assert!(allowed.rent.is_empty());
        assert_eq!(allowed.buy.len(), 1);
        assert_eq!(allowed.link, region.link);
    }
}
