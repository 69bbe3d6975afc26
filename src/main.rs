use eframe::egui;
use image_pin::app::PinApp;
use image_pin::settings::Settings;

const CONFIG_PATH: &str = "config.json";

fn main() -> anyhow::Result<()> {
    image_pin::logging::init();

    let settings = Settings::load(CONFIG_PATH);
    tracing::info!(opacity = settings.opacity, "settings loaded");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([300.0, 100.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Image Pin",
        native_options,
        Box::new(move |_cc| Box::new(PinApp::new(settings, CONFIG_PATH.to_owned()))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run ui: {err}"))
}
