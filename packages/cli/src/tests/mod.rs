mod inspect_tests;
