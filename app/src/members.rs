//! Members page, served at `/member`.

use leptos::prelude::*;
use leptos_meta::Title;

use crate::{
    api::{delete_member, list_members, save_member},
    components::{
        field, modal,
        page::{self, CELL_CLASS, HEAD_CLASS, TABLE_CLASS},
    },
    crud::{Editor, Listing, Named},
    forms::MemberForm,
    types::Member,
};

fn row(member: Member, listing: Listing<Member>, editor: Editor<MemberForm>) -> impl IntoView {
    let id = member.id;
    let form = MemberForm::from_record(&member);
    view! {
        <tr>
            <td class=CELL_CLASS>{member.full_name()}</td>
            <td class=CELL_CLASS>{member.email}</td>
            <td class=CELL_CLASS>{member.phone}</td>
            <td class=CELL_CLASS>
                {page::row_actions(
                    Callback::new(move |()| editor.open_edit(id, form.clone())),
                    Callback::new(move |()| listing.delete(id, delete_member)),
                    Signal::derive(move || listing.deleting.get() == Some(id)),
                )}
            </td>
        </tr>
    }
}

fn table(listing: Listing<Member>, editor: Editor<MemberForm>) -> impl IntoView {
    view! {
        <table class=TABLE_CLASS>
            <thead>
                <tr>
                    <th class=HEAD_CLASS>"Name"</th>
                    <th class=HEAD_CLASS>"Email"</th>
                    <th class=HEAD_CLASS>"Phone"</th>
                    <th class=format!("{HEAD_CLASS} w-28")>"Actions"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    listing
                        .items
                        .get()
                        .into_iter()
                        .map(|member| row(member, listing, editor))
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

fn editor_modal(listing: Listing<Member>, editor: Editor<MemberForm>) -> impl IntoView {
    let body = view! {
        <form on:submit=move |ev| {
            ev.prevent_default();
            editor.save(listing, MemberForm::validate, save_member);
        }>
            <div class="grid grid-cols-2 gap-x-4">
                {field::text(
                    "First Name",
                    "first_name",
                    "Enter first name",
                    editor.value(|form| &form.first_name),
                    editor.setter(|form, value| form.first_name = value),
                    editor.error("first_name"),
                )}
                {field::text(
                    "Last Name",
                    "last_name",
                    "Enter last name",
                    editor.value(|form| &form.last_name),
                    editor.setter(|form, value| form.last_name = value),
                    editor.error("last_name"),
                )}
            </div>
            {field::text(
                "Email",
                "email",
                "Enter email",
                editor.value(|form| &form.email),
                editor.setter(|form, value| form.email = value),
                editor.error("email"),
            )}
            {field::text(
                "Phone",
                "phone",
                "Enter phone number",
                editor.value(|form| &form.phone),
                editor.setter(|form, value| form.phone = value),
                editor.error("phone"),
            )}
            {modal::actions("Save", editor.submitting, Callback::new(move |()| editor.close()))}
        </form>
    }
    .into_any();

    modal::component(
        editor.heading(Member::NOUN),
        Callback::new(move |()| editor.close()),
        body,
    )
}

pub fn component() -> impl IntoView {
    let listing = Listing::<Member>::new();
    let editor = Editor::<MemberForm>::new();
    listing.load_on_mount(list_members);

    view! {
        <Title text="Members" />
        {page::card(
            "Members",
            "Add Member",
            Callback::new(move |()| editor.open_new()),
            page::load_switch(listing.state, move || table(listing, editor)).into_any(),
        )}
        <Show when=move || editor.open.get()>{move || editor_modal(listing, editor)}</Show>
    }
}
