use log::error;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use common::config::DashboardConfig;
use common::model::user::RegisterData;
use common::services::{AuthSession, InMemoryTemplateStore};

use crate::components::campaigns::wizard::CampaignWizard;
use crate::components::dashboard::Dashboard;
use crate::components::templates::editor::TemplateEditor;
use crate::components::templates::list::TemplateList;
use crate::services::LocalStorageSessionStore;

#[derive(Clone, PartialEq)]
pub enum Page {
    /// Overview shown right after sign-in.
    Dashboard,
    Templates,
    /// Editor on an existing template, or a new draft for `None`.
    Editor(Option<String>),
    BulkMessaging,
}

pub enum Msg {
    Navigate(Page),
    SetField(Field, String),
    ToggleRegister,
    SignIn,
    Logout,
    ConnectWhatsApp,
}

#[derive(Clone, Copy)]
pub enum Field {
    Name,
    Email,
    Password,
    BusinessName,
}

pub struct App {
    config: DashboardConfig,
    session: AuthSession<LocalStorageSessionStore>,
    store: InMemoryTemplateStore,
    page: Page,
    registering: bool,
    form: RegisterData,
    auth_error: Option<String>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = crate::config::load();
        let session = AuthSession::restore(LocalStorageSessionStore::new(config.session_key.clone()));
        Self {
            config,
            session,
            store: InMemoryTemplateStore::seeded(),
            page: Page::Dashboard,
            registering: false,
            form: RegisterData::default(),
            auth_error: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => self.page = page,
            Msg::SetField(field, value) => match field {
                Field::Name => self.form.name = value,
                Field::Email => self.form.email = value,
                Field::Password => self.form.password = value,
                Field::BusinessName => self.form.business_name = value,
            },
            Msg::ToggleRegister => self.registering = !self.registering,
            Msg::SignIn => {
                let result = if self.registering {
                    self.session.register(std::mem::take(&mut self.form)).map(|_| ())
                } else {
                    let form = std::mem::take(&mut self.form);
                    self.session.login(&form.email, &form.password).map(|_| ())
                };
                self.auth_error = result.err().map(|err| {
                    error!("sign in failed: {err}");
                    err.to_string()
                });
                if self.auth_error.is_none() {
                    self.page = Page::Dashboard;
                }
            }
            Msg::Logout => {
                self.session.logout();
                self.page = Page::Dashboard;
            }
            Msg::ConnectWhatsApp => {
                if let Err(err) = self.session.connect_whatsapp() {
                    error!("WhatsApp connection failed: {err}");
                    self.auth_error = Some(err.to_string());
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if !self.session.is_authenticated() {
            return self.sign_in_view(ctx);
        }

        let link = ctx.link();
        let connected = self.session.user().is_some_and(|u| u.whatsapp_connected);
        let content = match &self.page {
            Page::Dashboard => html! {
                <Dashboard
                    store={self.store.clone()}
                    whatsapp_connected={connected}
                    on_connect={link.callback(|_| Msg::ConnectWhatsApp)}
                    on_navigate={link.callback(Msg::Navigate)}
                />
            },
            Page::Templates => html! {
                <TemplateList
                    store={self.store.clone()}
                    on_edit={link.callback(|id| Msg::Navigate(Page::Editor(id)))}
                />
            },
            Page::Editor(id) => html! {
                <TemplateEditor
                    key={id.clone().unwrap_or_default()}
                    template_id={id.clone()}
                    store={self.store.clone()}
                    toast_duration_ms={self.config.toast_duration_ms}
                    on_close={link.callback(|_| Msg::Navigate(Page::Templates))}
                />
            },
            Page::BulkMessaging => html! {
                <CampaignWizard store={self.store.clone()} config={self.config.clone()} />
            },
        };

        html! {
            <>
                { self.header(ctx) }
                <main class="app-main">{ content }</main>
            </>
        }
    }
}

impl App {
    fn header(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let nav = |page: Page, label: &'static str| {
            let active = match (&self.page, &page) {
                (Page::Editor(_), Page::Templates) => true,
                (current, target) => current == target,
            };
            html! {
                <button
                    class={classes!("nav-btn", active.then_some("active"))}
                    onclick={link.callback(move |_| Msg::Navigate(page.clone()))}
                >
                    { label }
                </button>
            }
        };

        let (name, business, connected) = self
            .session
            .user()
            .map(|u| (u.name.clone(), u.business_name.clone(), u.whatsapp_connected))
            .unwrap_or_default();

        html! {
            <header class="app-header">
                <strong>{"WhatsApp Business"}</strong>
                { nav(Page::Dashboard, "Dashboard") }
                { nav(Page::Templates, "Templates") }
                { nav(Page::BulkMessaging, "Bulk Messaging") }
                <span class="spacer" />
                if connected {
                    <span class="badge approved">{"WhatsApp connected"}</span>
                } else {
                    <button class="btn" onclick={link.callback(|_| Msg::ConnectWhatsApp)}>
                        {"Connect WhatsApp"}
                    </button>
                }
                <span>{ format!("{name} · {business}") }</span>
                <button class="btn" onclick={link.callback(|_| Msg::Logout)}>{"Sign out"}</button>
            </header>
        }
    }

    fn sign_in_view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let input = |field: Field, label: &'static str, kind: &'static str, value: &str| {
            html! {
                <label style="display:block;margin-bottom:8px;">
                    { label }
                    <input
                        type={kind}
                        style="display:block;width:100%;"
                        value={value.to_string()}
                        oninput={link.callback(move |e: InputEvent| {
                            Msg::SetField(field, e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                </label>
            }
        };

        html! {
            <main class="app-main" style="max-width:420px;">
                <div class="card">
                    <h1>{ if self.registering { "Create your account" } else { "Sign in" } }</h1>
                    if self.registering {
                        { input(Field::Name, "Full name", "text", &self.form.name) }
                        { input(Field::BusinessName, "Business name", "text", &self.form.business_name) }
                    }
                    { input(Field::Email, "Email address", "email", &self.form.email) }
                    { input(Field::Password, "Password", "password", &self.form.password) }
                    if let Some(err) = &self.auth_error {
                        <p class="notice">{ err.clone() }</p>
                    }
                    <button class="btn primary" onclick={link.callback(|_| Msg::SignIn)}>
                        { if self.registering { "Register" } else { "Sign in" } }
                    </button>
                    <button class="btn" style="margin-left:8px;" onclick={link.callback(|_| Msg::ToggleRegister)}>
                        { if self.registering { "I already have an account" } else { "Create an account" } }
                    </button>
                </div>
            </main>
        }
    }
}
