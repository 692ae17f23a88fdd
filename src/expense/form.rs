use maud::{Markup, html};
use time::Date;

use crate::{
    Category,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The values an expense form is pre-filled with.
///
/// The new-expense page fills in only today's date; the edit page fills in
/// every field from the record being edited.
pub struct ExpenseFormDefaults<'a> {
    pub title: Option<&'a str>,
    pub amount: Option<f64>,
    pub category: Option<Category>,
    pub date: Date,
}

/// The input fields shared by the create and edit forms.
pub fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{:.2}", amount));
    let title_placeholder = defaults.title.unwrap_or("What was the money spent on?");

    html! {
        div
        {
            label
                for="title"
                class=(FORM_LABEL_STYLE)
            {
                "Title"
            }

            input
                name="title"
                id="title"
                type="text"
                placeholder=(title_placeholder)
                value=[defaults.title]
                required
                autofocus[defaults.title.is_none()]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0"
                placeholder="0.00"
                value=[amount_str.as_deref()]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in Category::ALL {
                    @if Some(category) == defaults.category {
                        option value=(category.code()) selected { (category.label()) }
                    } @else {
                        option value=(category.code()) { (category.label()) }
                    }
                }
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
