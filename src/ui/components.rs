use leptos::prelude::*;

use crate::items::{Alert, FormMode, Item, ItemForm, ItemView};

#[component]
pub fn AlertList(alerts: Vec<Alert>) -> impl IntoView {
    view! {
        <div id="alerts">
            {alerts
                .into_iter()
                .map(|alert| {
                    let class = format!("alert {}", alert.severity.css_class());
                    view! {
                        <div class=class role="alert">
                            {alert.message}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn ItemFormView(form: ItemForm) -> impl IntoView {
    let submit_label = match form.mode() {
        FormMode::Create => "Save",
        FormMode::Edit => "Update",
    };

    view! {
        <form id="itemForm" method="post" action="/items">
            <input type="hidden" id="elementId" name="elementId" value=form.element_id />
            <div class="form-group">
                <input
                    type="text"
                    class="form-control"
                    id="title"
                    name="title"
                    placeholder="Title"
                    value=form.title
                />
            </div>
            <div class="form-group">
                <input
                    type="text"
                    class="form-control"
                    id="content"
                    name="content"
                    placeholder="Content"
                    value=form.content
                />
            </div>
            <button type="submit" class="btn btn-success">
                {submit_label}
            </button>
        </form>
    }
}

#[component]
pub fn ItemRow(item: Item) -> impl IntoView {
    let delete_action = format!("/items/{}/delete", item.id);
    let edit_href = format!("/items/{}/edit", item.id);

    view! {
        <tr>
            <td>{item.title}</td>
            <td>{item.content}</td>
            <td>
                <form method="post" action=delete_action class="d-inline">
                    <button type="submit" class="btn btn-danger float-right">
                        "Delete"
                    </button>
                </form>
                <a href=edit_href class="btn btn-primary mr-2 float-right">
                    "Edit"
                </a>
            </td>
        </tr>
    }
}

#[component]
pub fn ItemTable(rows: Vec<Item>) -> impl IntoView {
    view! {
        <table class="table">
            <tbody id="listItems">
                <tr>
                    <th>"Title"</th>
                    <th>"Content"</th>
                    <th></th>
                </tr>
                {rows.into_iter().map(|item| view! { <ItemRow item=item /> }).collect_view()}
            </tbody>
        </table>
    }
}

#[component]
pub fn ItemsPage(page: ItemView) -> impl IntoView {
    view! {
        <main class="container">
            <h1>"Items"</h1>
            <AlertList alerts=page.alerts />
            <ItemFormView form=page.form />
            <ItemTable rows=page.rows />
        </main>
    }
}
