// End-to-end tests for the voice clone TTS service
//
// Each test starts the real router on an ephemeral port and talks to it over
// HTTP. The model backend is replaced either by an in-process fake repository
// (request handling tests) or by a fake OpenVoice worker that the real client
// talks to (strategy selection and two-stage pipeline tests).

mod test_health;
mod test_tts;
