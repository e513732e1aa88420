//! Ordered platform registry and URL classification.
//!
//! The registry maps a domain substring to a platform name. Order matters:
//! classification walks the entries front to back and the first key found
//! inside the URL wins.

use std::collections::HashSet;

/// Label for URLs that match no registry key.
pub const OTHER_PLATFORM: &str = "Other";

/// Built-in domain → platform table, in match-priority order.
const DEFAULT_PLATFORMS: &[(&str, &str)] = &[
    ("126.com", "126 Mail"),
    ("163.com", "163 Mail"),
    ("about.me", "About.me"),
    ("alibaba.com", "Alibaba"),
    ("amazon.com", "Amazon"),
    ("americanexpress.com", "AmEx"),
    ("angellist.com", "AngelList"),
    ("apple.com", "Apple"),
    ("baidu.com", "Baidu"),
    ("bandcamp.com", "Bandcamp"),
    ("behance.net", "Behance"),
    ("binance.com", "Binance"),
    ("bisq.network", "Bisq"),
    ("bitbank.cc", "BitBank"),
    ("bitcambio.com.br", "BitCambio"),
    ("bitfinex.com", "Bitfinex"),
    ("bitflyer.com", "Bitflyer"),
    ("bitmex.com", "BitMEX"),
    ("bitso.com", "Bitso"),
    ("bitstamp.net", "Bitstamp"),
    ("blogspot.com", "Blogger"),
    ("blockchain.com", "Blockchain"),
    ("box.com", "Box"),
    ("breached.to", "Breached"),
    ("cash.app", "Cash App"),
    ("chase.com", "Chase"),
    ("citibank.com", "CitiBank"),
    ("clickup.com", "ClickUp"),
    ("codeberg.org", "Codeberg"),
    ("codepen.io", "CodePen"),
    ("codeproject.com", "CodeProject"),
    ("coinbase.com", "Coinbase"),
    ("coincheck.com", "Coincheck"),
    ("coggle.it", "Coggle"),
    ("dev.to", "Dev.to"),
    ("devpost.com", "Devpost"),
    ("deribit.com", "Deribit"),
    ("discord.com", "Discord"),
    ("discover.com", "Discover"),
    ("dribbble.com", "Dribbble"),
    ("dropbox.com", "Dropbox"),
    ("ebay.com", "eBay"),
    ("evernote.com", "Evernote"),
    ("facebook.com", "Facebook"),
    ("figma.com", "Figma"),
    ("flickr.com", "Flickr"),
    ("foursquare.com", "Foursquare"),
    ("ftx.com", "FTX"),
    ("gemini.com", "Gemini"),
    ("github.com", "GitHub"),
    ("gitlab.com", "GitLab"),
    ("gmail.com", "Gmail"),
    ("google.com", "Google"),
    ("googleusercontent.com", "Google Files"),
    ("goodreads.com", "Goodreads"),
    ("gravatar.com", "Gravatar"),
    ("ghostbin.com", "Ghostbin"),
    ("hastebin.com", "Hastebin"),
    ("hollaex.com", "HollaEx"),
    ("hotmail.com", "Hotmail"),
    ("huobi.com", "Huobi"),
    ("icloud.com", "iCloud"),
    ("instagram.com", "Instagram"),
    ("issuu.com", "Issuu"),
    ("jd.com", "JD"),
    ("justpaste.it", "JustPaste"),
    ("keybase.io", "Keybase"),
    ("kraken.com", "Kraken"),
    ("kucoin.com", "KuCoin"),
    ("linkedin.com", "LinkedIn"),
    ("live.com", "Live"),
    ("localbitcoins.com", "LocalBitcoins"),
    ("mail.ru", "Mail.ru"),
    ("mastercard.com", "MasterCard"),
    ("medium.com", "Medium"),
    ("meetup.com", "Meetup"),
    ("mercadobitcoin.com.br", "MercadoBitcoin"),
    ("microsoft.com", "Microsoft"),
    ("myspace.com", "MySpace"),
    ("notion.so", "Notion"),
    ("okex.com", "OKEx"),
    ("outlook.com", "Outlook"),
    ("paste.ee", "Paste.ee"),
    ("pastebin.com", "Pastebin"),
    ("paxful.com", "Paxful"),
    ("paypal.com", "PayPal"),
    ("pinterest.com", "Pinterest"),
    ("poloniex.com", "Poloniex"),
    ("protonmail.com", "ProtonMail"),
    ("proton.me", "Proton"),
    ("quora.com", "Quora"),
    ("reddit.com", "Reddit"),
    ("researchgate.net", "ResearchGate"),
    ("scribd.com", "Scribd"),
    ("signal.org", "Signal"),
    ("sina.com.cn", "Sina"),
    ("slack.com", "Slack"),
    ("slideshare.net", "SlideShare"),
    ("snapchat.com", "Snapchat"),
    ("sohu.com", "Sohu"),
    ("soundcloud.com", "SoundCloud"),
    ("squareup.com", "Square"),
    ("stackoverflow.com", "Stack Overflow"),
    ("stripe.com", "Stripe"),
    ("taobao.com", "Taobao"),
    ("telegram.me", "Telegram"),
    ("telegram.org", "Telegram"),
    ("tencent.com", "Tencent"),
    ("tiktok.com", "TikTok"),
    ("trello.com", "Trello"),
    ("tumblr.com", "Tumblr"),
    ("twitch.tv", "Twitch"),
    ("twitter.com", "Twitter"),
    ("usaa.com", "USAA"),
    ("venmo.com", "Venmo"),
    ("vk.com", "VK"),
    ("visa.com", "Visa"),
    ("vimeo.com", "Vimeo"),
    ("weibo.com", "Weibo"),
    ("weixin.qq.com", "Weixin"),
    ("wellsfargo.com", "Wells Fargo"),
    ("whatsapp.com", "WhatsApp"),
    ("wikipedia.org", "Wikipedia"),
    ("wordpress.com", "WordPress"),
    ("xing.com", "Xing"),
    ("yahoo.com", "Yahoo"),
    ("yandex.ru", "Yandex"),
    ("youtube.com", "YouTube"),
    ("zaifinance.com", "Zaif"),
    ("zellepay.com", "Zelle"),
    ("zoho.com", "Zoho"),
];

/// Immutable, ordered mapping from domain substring to platform name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRegistry {
    entries: Vec<(String, String)>,
}

impl PlatformRegistry {
    /// Build a registry from ordered `(domain, platform)` pairs.
    ///
    /// A repeated domain keeps its first position and platform.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| seen.insert(k.clone()))
            .collect();

        Self { entries }
    }

    /// Platform name for `url`, or [`OTHER_PLATFORM`] when nothing matches.
    #[must_use]
    pub fn classify(&self, url: &str) -> &str {
        if url.is_empty() {
            return OTHER_PLATFORM;
        }

        self.entries
            .iter()
            .find(|(domain, _)| url.contains(domain.as_str()))
            .map_or(OTHER_PLATFORM, |(_, platform)| platform.as_str())
    }

    /// Registry keys in priority order.
    #[must_use]
    pub fn domains(&self) -> Vec<&str> {
        self.entries.iter().map(|(domain, _)| domain.as_str()).collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PLATFORMS.iter().copied())
    }
}
