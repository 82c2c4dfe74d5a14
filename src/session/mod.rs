pub(crate) mod slideshow_session;
