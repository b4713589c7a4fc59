use predictor_core::FormViewModel;

use super::document::Document;

/// Projects the view model onto the document. Applying the same view twice
/// leaves the document unchanged.
pub fn render(doc: &mut impl Document, view: &FormViewModel) {
    for field in &view.fields {
        doc.set_control_value(&field.name, &field.value);
        doc.set_validity_marker(&field.name, field.marker);
        doc.set_field_error(&field.name, field.error.as_deref());
    }

    doc.set_progress(&view.progress.width_style(), &view.progress.label);
    for (index, step) in view.steps.iter().enumerate() {
        doc.set_step_class(index, step.css_class());
    }
    doc.set_submit(view.submit);
    doc.set_banner(view.banner.as_ref().map(|banner| banner.message.as_str()));
    doc.set_theme(view.theme);
}
