use arcpick::config;
use arcpick_gtk::events::AppEvent;
use arcpick_gtk::gui::app::AppModel;
use arcpick_gtk::gui::picker::PickerModel;
use arcpick_gtk::sys::runtime;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_sample();
    let (tx, rx) = async_channel::bounded(32);

    let selection_tx = tx.clone();
    let picker = PickerModel::new(config.picker, config.view.follow_active, move |event| {
        if let Err(e) = selection_tx.try_send(AppEvent::Selected(event)) {
            log::warn!("Dropped selection event: {}", e);
        }
    })?;

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.arcpick.picker");

    app.run::<AppModel>((picker, config.view, rx));
    Ok(())
}
