pub mod funnel_editor;
