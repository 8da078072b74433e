mod app;

fn main() -> eframe::Result {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Scuba Pic Fix"),
        ..Default::default()
    };

    eframe::run_native(
        "Scuba Pic Fix",
        options,
        Box::new(|cc| Ok(Box::new(app::EditorApp::new(cc)))),
    )
}
