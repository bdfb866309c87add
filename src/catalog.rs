//! Built-in template catalog inserted on first start.

use serde_json::json;

use crate::domain::{CanvasConfig, ExportSize, LayerConfig, SlideData, TemplateConfig};
use crate::models::NewTemplate;

pub const PLATFORM_IOS: &str = "ios";
pub const PLATFORM_ANDROID: &str = "android";
pub const PLATFORM_BOTH: &str = "both";

fn canvas(width: u32, height: u32, background: &str) -> CanvasConfig {
    CanvasConfig {
        width,
        height,
        background_color: background.to_string(),
    }
}

fn export(name: &str, platform: &str, width: u32, height: u32) -> ExportSize {
    ExportSize {
        name: name.to_string(),
        platform: platform.to_string(),
        width,
        height,
    }
}

fn ios_exports() -> Vec<ExportSize> {
    vec![
        export("iPhone 6.7\"", PLATFORM_IOS, 1290, 2796),
        export("iPhone 6.5\"", PLATFORM_IOS, 1242, 2688),
        export("iPhone 5.5\"", PLATFORM_IOS, 1242, 2208),
        export("iPad 12.9\"", PLATFORM_IOS, 2048, 2732),
    ]
}

fn android_exports() -> Vec<ExportSize> {
    vec![
        export("Phone", PLATFORM_ANDROID, 1080, 1920),
        export("7\" Tablet", PLATFORM_ANDROID, 1200, 1920),
        export("10\" Tablet", PLATFORM_ANDROID, 1600, 2560),
    ]
}

fn text_layer(id: &str, content: &str, y: f64, font_size: u32, color: &str, z: i32) -> LayerConfig {
    LayerConfig {
        id: id.to_string(),
        kind: "text".to_string(),
        name: id.replace('-', " "),
        x: 80.0,
        y,
        width: 1130.0,
        height: f64::from(font_size) * 2.4,
        properties: json!({
            "content": content,
            "fontFamily": "Inter",
            "fontSize": font_size,
            "fontWeight": 700,
            "color": color,
            "align": "center",
        }),
        z_index: z,
        ..LayerConfig::default()
    }
}

fn background_layer(fill: &str, gradient_to: Option<&str>, width: f64, height: f64) -> LayerConfig {
    let mut properties = json!({ "fill": fill });
    if let Some(to) = gradient_to {
        properties["gradient"] = json!({ "from": fill, "to": to, "angle": 180 });
    }
    LayerConfig {
        id: "background".to_string(),
        kind: "shape".to_string(),
        name: "Background".to_string(),
        width,
        height,
        locked: true,
        properties,
        ..LayerConfig::default()
    }
}

fn screenshot_layer(frame: &str, x: f64, y: f64, width: f64, height: f64, z: i32) -> LayerConfig {
    LayerConfig {
        id: "screenshot".to_string(),
        kind: "screenshot".to_string(),
        name: "Screenshot".to_string(),
        x,
        y,
        width,
        height,
        properties: json!({ "src": "", "deviceFrame": frame, "cornerRadius": 48 }),
        z_index: z,
        ..LayerConfig::default()
    }
}

fn slide(id: &str, canvas: &CanvasConfig, layers: Vec<LayerConfig>) -> SlideData {
    SlideData {
        id: id.to_string(),
        canvas: canvas.clone(),
        layers,
    }
}

fn bold_gradient_ios() -> NewTemplate {
    let canvas = canvas(1290, 2796, "#1e1b4b");
    let layers = vec![
        background_layer("#4f46e5", Some("#1e1b4b"), 1290.0, 2796.0),
        text_layer("headline", "Your app, at a glance", 180.0, 96, "#ffffff", 2),
        text_layer("subheadline", "Everything you need in one place", 420.0, 48, "#c7d2fe", 3),
        screenshot_layer("iphone-15-pro", 195.0, 700.0, 900.0, 1950.0, 1),
    ];

    NewTemplate {
        name: "Bold Gradient".to_string(),
        description: "Full-bleed gradient with a centred device frame and large headline."
            .to_string(),
        platform: PLATFORM_IOS.to_string(),
        category: "gradient".to_string(),
        thumbnail: "/templates/bold-gradient.png".to_string(),
        thumbnails: vec![
            "/templates/bold-gradient-1.png".to_string(),
            "/templates/bold-gradient-2.png".to_string(),
        ],
        json_config: TemplateConfig {
            slides: vec![
                slide("slide-1", &canvas, layers.clone()),
                slide("slide-2", &canvas, layers.clone()),
            ],
            canvas,
            layers,
            exports: ios_exports(),
        },
    }
}

fn minimal_light_ios() -> NewTemplate {
    let canvas = canvas(1290, 2796, "#f8fafc");
    let layers = vec![
        background_layer("#f8fafc", None, 1290.0, 2796.0),
        text_layer("headline", "Simple. Fast. Yours.", 200.0, 88, "#0f172a", 2),
        screenshot_layer("iphone-15", 245.0, 560.0, 800.0, 1740.0, 1),
    ];

    NewTemplate {
        name: "Minimal Light".to_string(),
        description: "Clean light background with a single caption.".to_string(),
        platform: PLATFORM_IOS.to_string(),
        category: "minimal".to_string(),
        thumbnail: "/templates/minimal-light.png".to_string(),
        thumbnails: vec!["/templates/minimal-light-1.png".to_string()],
        json_config: TemplateConfig {
            slides: vec![slide("slide-1", &canvas, layers.clone())],
            canvas,
            layers,
            exports: ios_exports(),
        },
    }
}

fn material_showcase_android() -> NewTemplate {
    let canvas = canvas(1080, 1920, "#0f766e");
    let layers = vec![
        background_layer("#14b8a6", Some("#0f766e"), 1080.0, 1920.0),
        text_layer("headline", "Built for Android", 120.0, 72, "#ffffff", 2),
        screenshot_layer("pixel-8", 190.0, 420.0, 700.0, 1420.0, 1),
    ];

    NewTemplate {
        name: "Material Showcase".to_string(),
        description: "Teal gradient tuned for Play Store phone screenshots.".to_string(),
        platform: PLATFORM_ANDROID.to_string(),
        category: "gradient".to_string(),
        thumbnail: "/templates/material-showcase.png".to_string(),
        thumbnails: vec!["/templates/material-showcase-1.png".to_string()],
        json_config: TemplateConfig {
            slides: vec![slide("slide-1", &canvas, layers.clone())],
            canvas,
            layers,
            exports: android_exports(),
        },
    }
}

fn dark_feature_android() -> NewTemplate {
    let canvas = canvas(1080, 1920, "#111827");
    let layers = vec![
        background_layer("#111827", None, 1080.0, 1920.0),
        text_layer("headline", "Stay in the flow", 140.0, 72, "#f9fafb", 3),
        text_layer("badge", "NEW", 60.0, 32, "#fbbf24", 4),
        screenshot_layer("pixel-8-pro", 140.0, 400.0, 800.0, 1460.0, 1),
    ];

    NewTemplate {
        name: "Dark Feature".to_string(),
        description: "Dark theme with an accent badge for feature callouts.".to_string(),
        platform: PLATFORM_ANDROID.to_string(),
        category: "dark".to_string(),
        thumbnail: "/templates/dark-feature.png".to_string(),
        thumbnails: Vec::new(),
        json_config: TemplateConfig {
            slides: vec![slide("slide-1", &canvas, layers.clone())],
            canvas,
            layers,
            exports: android_exports(),
        },
    }
}

fn cross_platform_panorama() -> NewTemplate {
    let canvas = canvas(1290, 2796, "#fff7ed");
    let layers = vec![
        background_layer("#fed7aa", Some("#fff7ed"), 1290.0, 2796.0),
        text_layer("headline", "One app, every device", 160.0, 90, "#7c2d12", 2),
        screenshot_layer("generic-phone", 220.0, 620.0, 850.0, 1840.0, 1),
    ];
    let mut exports = ios_exports();
    exports.extend(android_exports());

    NewTemplate {
        name: "Panorama".to_string(),
        description: "Warm panorama layout exported for both stores.".to_string(),
        platform: PLATFORM_BOTH.to_string(),
        category: "panorama".to_string(),
        thumbnail: "/templates/panorama.png".to_string(),
        thumbnails: vec![
            "/templates/panorama-1.png".to_string(),
            "/templates/panorama-2.png".to_string(),
            "/templates/panorama-3.png".to_string(),
        ],
        json_config: TemplateConfig {
            slides: vec![
                slide("slide-1", &canvas, layers.clone()),
                slide("slide-2", &canvas, layers.clone()),
                slide("slide-3", &canvas, layers.clone()),
            ],
            canvas,
            layers,
            exports,
        },
    }
}

/// The fixed catalog, in the order it is stored and listed.
#[must_use]
pub fn builtin() -> Vec<NewTemplate> {
    vec![
        bold_gradient_ios(),
        minimal_light_ios(),
        material_showcase_android(),
        dark_feature_android(),
        cross_platform_panorama(),
    ]
}
