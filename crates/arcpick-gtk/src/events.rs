use arcpick::ChangeEvent;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Selected(ChangeEvent),
    ConfigReload,
}
