mod crud_tests;
