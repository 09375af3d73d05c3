use crate::events::AppEvent;
use crate::gui::picker::{self, PickerModel, Surface};
use crate::gui::theme::{self, ThemeColors};
use arcpick::config::{self, ViewConfig};
use arcpick::{ChangeEvent, Point};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<PickerModel>>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Click(Point),
    Selected(ChangeEvent),
    ConfigReload,
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Selected(e) => AppMsg::Selected(e),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn surface(&self) -> Surface {
        Surface::fit(
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
        )
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        PickerModel,
        ViewConfig,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("arcpick"),
            set_default_size: (view_config.width, view_config.height),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "arcpick-drawing-area",

                add_controller = gtk::GestureClick {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, view_config, rx) = init;

        theme::load_css();

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = picker::draw(
                    cr,
                    &mut state_draw.borrow_mut(),
                    &colors,
                    width as f64,
                    height as f64,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Click(point) => {
                let Some(point) = self.surface().to_view(point) else {
                    return;
                };
                let result = self.state.borrow_mut().click_at(point);
                match result {
                    Some(Ok(_)) => self.drawing_area.queue_draw(),
                    Some(Err(e)) => log::error!("Selection rejected: {}", e),
                    None => {}
                }
            }
            AppMsg::Selected(event) => {
                let state = self.state.borrow();
                if let Some(label) = state.picker.items().get(event.current) {
                    log::info!(
                        "Selected '{}' (previously {:?})",
                        label,
                        event.previous
                    );
                    self.root.set_title(Some(&format!("arcpick: {}", label)));
                }
            }
            AppMsg::ConfigReload => match config::load_config(None) {
                Ok(new_config) => {
                    let result = self
                        .state
                        .borrow_mut()
                        .reconfigure(new_config.picker, new_config.view.follow_active);
                    match result {
                        Ok(()) => {
                            self.drawing_area.queue_draw();
                            log::info!("Configuration reloaded");
                        }
                        Err(e) => log::error!("Ignoring reloaded config: {}", e),
                    }
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Close => self.root.close(),
        }
    }
}
