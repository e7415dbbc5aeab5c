use maud::{Markup, html};
use time::Date;

use crate::{
    alert::ALERT_CONTAINER_ID,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
};

/// The ID of the expense entry form.
pub const EXPENSE_FORM_ID: &str = "expense-form";

/// Render the expense entry form with empty fields and `today` as the date.
///
/// A successful submission swaps the form for a fresh copy, which is how the
/// fields get reset. Validation is left to the Expense API, so no field is
/// marked as required.
pub fn expense_form_view(today: Date) -> Markup {
    html! {
        form
            id=(EXPENSE_FORM_ID)
            hx-post=(endpoints::EXPENSES)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error={ "#" (ALERT_CONTAINER_ID) }
            hx-disabled-elt="find button[type=submit]"
            class="w-full grid grid-cols-1 md:grid-cols-2 gap-4"
        {
            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="What did you spend on?"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        placeholder="0.00"
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    name="category"
                    id="category"
                    type="text"
                    placeholder="e.g. Food"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(today)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="md:col-span-2"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    "Add Expense"
                }
            }
        }
    }
}
