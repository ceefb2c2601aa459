use common::model::section::{
    ButtonGroup, ButtonType, ContentSection, MAX_BUTTONS, SectionKind, SectionPatch, UrlKind,
};
use common::model::template::{Template, TemplateStatus};
use common::model::validation::validate;
use common::services::{
    InMemoryTemplateStore, MockTemplateApproval, TemplateApproval, TemplateRepository,
};
use futures::executor::block_on;

fn buttons(template: &Template) -> &ButtonGroup {
    template
        .sections
        .iter()
        .find_map(|s| match s {
            ContentSection::Buttons { group } => Some(group),
            _ => None,
        })
        .expect("buttons section")
}

#[test]
fn every_section_kind_is_a_singleton() {
    let mut template = Template::new_draft();
    for kind in SectionKind::all() {
        template.add_section(kind);
        template.add_section(kind);
        assert_eq!(template.section_count(kind), 1);
    }
    assert_eq!(template.sections.len(), 4);
}

#[test]
fn button_count_is_capped() {
    let mut template = Template::new_draft();
    template.add_section(SectionKind::Buttons);
    let index = template.position(SectionKind::Buttons).unwrap();
    for _ in 0..10 {
        template.add_button(index);
    }
    assert_eq!(buttons(&template).len(), MAX_BUTTONS);
}

#[test]
fn url_buttons_survive_round_trip_through_quick_reply() {
    let mut template = Template::new_draft();
    template.add_section(SectionKind::Buttons);
    let index = template.position(SectionKind::Buttons).unwrap();
    template.change_button_type(index, ButtonType::Url);
    template.update_section(
        index,
        SectionPatch::ButtonText {
            index: 0,
            text: "Track".into(),
        },
    );
    template.update_section(
        index,
        SectionPatch::ButtonUrl {
            index: 0,
            url: "https://t.example.com/{{1}}".into(),
        },
    );
    template.update_section(
        index,
        SectionPatch::ButtonUrlKind {
            index: 0,
            kind: UrlKind::Dynamic,
        },
    );

    template.change_button_type(index, ButtonType::QuickReply);
    template.change_button_type(index, ButtonType::Url);

    match buttons(&template) {
        ButtonGroup::Url(urls) => {
            assert_eq!(urls[0].text, "Track");
            assert_eq!(urls[0].url, "");
            assert_eq!(urls[0].url_kind, UrlKind::Static);
        }
        other => panic!("expected url buttons, got {other:?}"),
    }
}

#[test]
fn edited_template_saves_and_goes_pending() {
    let store = InMemoryTemplateStore::default();
    let mut template = Template::new_draft();
    template.name = "order_shipped".into();
    template.update_section(0, SectionPatch::Text("Hi {{1}}, order {{2}} shipped".into()));
    assert!(validate(&template).is_empty());
    assert_eq!(template.variables(), vec![1, 2]);

    let saved = template.fingerprint();
    block_on(store.save(template.clone())).unwrap();

    let status = block_on(MockTemplateApproval.submit(&template)).unwrap();
    template.status = status;
    assert_eq!(template.status, TemplateStatus::Pending);
    assert_ne!(template.fingerprint(), saved);

    block_on(store.save(template.clone())).unwrap();
    assert_eq!(
        block_on(store.get(&template.id)).unwrap().status,
        TemplateStatus::Pending
    );
}
