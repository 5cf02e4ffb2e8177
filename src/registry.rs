//! Fixed catalogue of content templates and tones.
//!
//! Identifiers arrive as free-form strings from the client. Anything that is
//! not an exact match resolves to the default entry, so lookup never fails.

use serde::Serialize;

/// Content category a prompt is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateId {
    #[default]
    BusinessEmail,
    BlogPost,
    SnsPost,
    Presentation,
    CustomerSupport,
    Creative,
}

impl TemplateId {
    /// Every template, default first
    pub const ALL: [TemplateId; 6] = [
        TemplateId::BusinessEmail,
        TemplateId::BlogPost,
        TemplateId::SnsPost,
        TemplateId::Presentation,
        TemplateId::CustomerSupport,
        TemplateId::Creative,
    ];

    /// Resolve a wire identifier, falling back to [`TemplateId::BusinessEmail`]
    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some("business-email") => TemplateId::BusinessEmail,
            Some("blog-post") => TemplateId::BlogPost,
            Some("sns-post") => TemplateId::SnsPost,
            Some("presentation") => TemplateId::Presentation,
            Some("customer-support") => TemplateId::CustomerSupport,
            Some("creative") => TemplateId::Creative,
            _ => TemplateId::default(),
        }
    }

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::BusinessEmail => "business-email",
            TemplateId::BlogPost => "blog-post",
            TemplateId::SnsPost => "sns-post",
            TemplateId::Presentation => "presentation",
            TemplateId::CustomerSupport => "customer-support",
            TemplateId::Creative => "creative",
        }
    }

    /// System-instruction fragment for this category.
    ///
    /// The texts live in `src/templates/*.txt` and are embedded at compile
    /// time with `include_str!`.
    pub fn instruction(&self) -> &'static str {
        match self {
            TemplateId::BusinessEmail => include_str!("templates/business_email.txt"),
            TemplateId::BlogPost => include_str!("templates/blog_post.txt"),
            TemplateId::SnsPost => include_str!("templates/sns_post.txt"),
            TemplateId::Presentation => include_str!("templates/presentation.txt"),
            TemplateId::CustomerSupport => include_str!("templates/customer_support.txt"),
            TemplateId::Creative => include_str!("templates/creative.txt"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateId::BusinessEmail => "ビジネスメール",
            TemplateId::BlogPost => "ブログ記事",
            TemplateId::SnsPost => "SNS投稿",
            TemplateId::Presentation => "プレゼン資料",
            TemplateId::CustomerSupport => "カスタマー対応",
            TemplateId::Creative => "クリエイティブ",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateId::BusinessEmail => "敬語を使った丁寧なメール",
            TemplateId::BlogPost => "SEO対応の記事構成",
            TemplateId::SnsPost => "バズるTwitter/Instagram投稿",
            TemplateId::Presentation => "説得力のあるスライド構成",
            TemplateId::CustomerSupport => "丁寧なお客様対応文",
            TemplateId::Creative => "自由な発想を引き出す",
        }
    }
}

/// Writing style requested for the generated prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToneId {
    #[default]
    Formal,
    Casual,
    Friendly,
    Professional,
}

impl ToneId {
    /// Every tone, default first
    pub const ALL: [ToneId; 4] = [
        ToneId::Formal,
        ToneId::Casual,
        ToneId::Friendly,
        ToneId::Professional,
    ];

    /// Resolve a wire identifier, falling back to [`ToneId::Formal`]
    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some("formal") => ToneId::Formal,
            Some("casual") => ToneId::Casual,
            Some("friendly") => ToneId::Friendly,
            Some("professional") => ToneId::Professional,
            _ => ToneId::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToneId::Formal => "formal",
            ToneId::Casual => "casual",
            ToneId::Friendly => "friendly",
            ToneId::Professional => "professional",
        }
    }

    /// Tone directive embedded in the system message
    pub fn instruction(&self) -> &'static str {
        match self {
            ToneId::Formal => "敬語（です・ます調）を使用し、フォーマルなトーンで",
            ToneId::Casual => "カジュアルな口語体で、親しみやすいトーンで",
            ToneId::Friendly => "フレンドリーで温かみのあるトーンで",
            ToneId::Professional => "プロフェッショナルで信頼感のあるトーンで",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToneId::Formal => "敬語・フォーマル",
            ToneId::Casual => "カジュアル",
            ToneId::Friendly => "フレンドリー",
            ToneId::Professional => "プロフェッショナル",
        }
    }
}

/// Instruction text for a template id, or the business-email text on a miss
pub fn resolve_template(id: Option<&str>) -> &'static str {
    TemplateId::from_id(id).instruction()
}

/// Instruction text for a tone id, or the formal text on a miss
pub fn resolve_tone(id: Option<&str>) -> &'static str {
    ToneId::from_id(id).instruction()
}

#[derive(Debug, Serialize)]
pub struct TemplateEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ToneEntry {
    pub id: &'static str,
    pub label: &'static str,
}

/// Display catalogue served to the page
#[derive(Debug, Serialize)]
pub struct Catalogue {
    pub templates: Vec<TemplateEntry>,
    pub tones: Vec<ToneEntry>,
}

pub fn catalogue() -> Catalogue {
    Catalogue {
        templates: TemplateId::ALL
            .iter()
            .map(|t| TemplateEntry {
                id: t.as_str(),
                label: t.label(),
                description: t.description(),
            })
            .collect(),
        tones: ToneId::ALL
            .iter()
            .map(|t| ToneEntry {
                id: t.as_str(),
                label: t.label(),
            })
            .collect(),
    }
}
