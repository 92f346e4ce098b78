// End-to-end tests for the long audio synthesis flow
//
// Each test gets its own wiremock server standing in for the Google
// Text-to-Speech REST API and its own temporary directory for the source text.
// The submitter is wired exactly as `main` wires it: config -> Google
// repository -> SynthesisRequestSubmitter.

mod test_submit;
